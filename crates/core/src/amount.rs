//! Amount - Non-negative decimal wrapper for asset amounts
//!
//! Every amount that enters the engine (user input, balances, prices,
//! minimums) is an `Amount`. Negative values cannot be represented.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),

    #[error("Malformed amount: {0:?}")]
    Malformed(String),
}

/// A non-negative decimal amount of some asset.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use refnet_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::parse("2.5").unwrap();
/// assert_eq!(amount.value(), Decimal::new(25, 1));
///
/// assert!(Amount::parse("-1").is_err());
/// assert!(Amount::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(AmountError::Negative(value))
        } else {
            Ok(Self(value.abs()))
        }
    }

    /// Create an Amount without validation.
    ///
    /// The caller MUST ensure the value is non-negative. Intended for
    /// compile-time constants built with `dec!`.
    #[inline]
    pub const fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse user-entered text.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain
    /// decimal number is `Malformed`; a well-formed negative number is
    /// `Negative`. Input that cannot be held without rounding is also
    /// `Malformed`.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let malformed = || AmountError::Malformed(input.to_string());
        let trimmed = input.trim();
        let scale = plain_decimal_scale(trimmed).ok_or_else(malformed)?;
        let value = Decimal::from_str(trimmed).map_err(|_| malformed())?;
        if value.scale() as usize != scale {
            return Err(malformed());
        }
        Self::new(value)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        let result = self.0.checked_sub(other.0)?;
        if result < Decimal::ZERO {
            None
        } else {
            Some(Amount(result))
        }
    }

    /// Round for display. Computation never goes through this.
    pub fn round_for_display(&self, dp: u32) -> Decimal {
        self.0
            .round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }
}

/// Number of fractional digits if `text` is `[-]digits[.digits]` with at
/// least one digit overall, `None` otherwise.
fn plain_decimal_scale(text: &str) -> Option<usize> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            if frac_part.is_empty() {
                return None;
            }
            (int_part, frac_part)
        }
        None => (unsigned, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    if frac_part.len() > MAX_SCALE {
        return None;
    }
    Some(frac_part.len())
}

/// Largest scale a `Decimal` can carry
const MAX_SCALE: usize = 28;

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(Amount::parse("2.5").unwrap().value(), dec!(2.5));
        assert_eq!(Amount::parse(" 0.05 ").unwrap().value(), dec!(0.05));
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse(".5").unwrap().value(), dec!(0.5));
        assert_eq!(Amount::parse("2.50").unwrap().value().scale(), 2);

        let finest = "0.0000000000000000000000000001";
        assert_eq!(Amount::parse(finest).unwrap().value().scale(), 28);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let too_fine = "0.00000000000000000000000000001";
        let rounded = "0.12345678901234567890123456789";
        let too_many_digits = "12345678901234567890.123456789012345";
        for input in [
            "", "   ", "abc", "1.2.3", "0x10", "1,5", "1e3", "1E-2", "1_000", "+1", ".", "-", "1.",
            "- 1", "NaN", too_fine, rounded, too_many_digits,
        ] {
            assert!(
                matches!(Amount::parse(input), Err(AmountError::Malformed(_))),
                "expected Malformed for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(
            Amount::parse("-0.5"),
            Err(AmountError::Negative(_))
        ));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let amount = Amount::parse("-0").unwrap();
        assert!(amount.is_zero());
        assert!(!amount.value().is_sign_negative());
    }

    #[test]
    fn test_checked_sub_prevents_negative() {
        let a = Amount::new(dec!(50)).unwrap();
        let b = Amount::new(dec!(100)).unwrap();
        assert!(a.checked_sub(&b).is_none());
        assert_eq!(b.checked_sub(&a).unwrap().value(), dec!(50));
    }

    #[test]
    fn test_round_for_display() {
        let amount = Amount::new(dec!(0.123456789)).unwrap();
        assert_eq!(amount.round_for_display(4), dec!(0.1235));
        assert_eq!(Amount::new(dec!(2.50)).unwrap().round_for_display(6), dec!(2.5));
    }

    #[test]
    fn test_serde_as_string() {
        let amount = Amount::new(dec!(123.45)).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"123.45\"");
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, parsed);

        let negative: Result<Amount, _> = serde_json::from_str("\"-1\"");
        assert!(negative.is_err());
    }
}
