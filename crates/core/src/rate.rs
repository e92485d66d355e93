//! Rate - Fraction used for fees and referral commissions

use crate::amount::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("Rate must be in [0, 1): {0}")]
    OutOfRange(Decimal),
}

/// A fraction in `[0, 1)`.
///
/// Serialized as a decimal string (`"0.05"`), displayed as a percentage
/// (`5%`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, RateError> {
        if value < Decimal::ZERO || value >= Decimal::ONE {
            Err(RateError::OutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Build a rate from whole percent, e.g. `Rate::percent(5)` is `0.05`.
    pub fn percent(percent: u32) -> Result<Self, RateError> {
        Self::new(Decimal::from(percent) / Decimal::ONE_HUNDRED)
    }

    /// Create a Rate without validation.
    ///
    /// The caller MUST ensure the value is in `[0, 1)`.
    #[inline]
    pub const fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// `amount × rate` in full precision. None on overflow.
    pub fn apply(&self, amount: Amount) -> Option<Amount> {
        amount
            .value()
            .checked_mul(self.0)
            .map(Amount::new_unchecked)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}
