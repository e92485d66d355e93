//! Referral dashboard statistics

use crate::error::ReferralError;
use refnet_core::{Amount, Rate};
use refnet_engine::Package;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user brought in by the holder, directly or further down the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    pub address: String,
    pub level: u8,
    pub earned: Amount,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    pub total_earned: Amount,
    pub referrals_count: usize,
    /// Distinct tree levels that have at least one active referral
    pub active_levels: usize,
    /// Commission rate of the holder's package, if they hold one
    pub commission_rate: Option<Rate>,
}

impl ReferralStats {
    pub fn summarize(
        referrals: &[Referral],
        package: Option<&Package>,
    ) -> Result<Self, ReferralError> {
        let total_earned = referrals
            .iter()
            .try_fold(Amount::ZERO, |acc, r| acc.checked_add(&r.earned))
            .ok_or(ReferralError::Overflow)?;

        let active_levels: BTreeSet<u8> = referrals
            .iter()
            .filter(|r| r.active)
            .map(|r| r.level)
            .collect();

        Ok(Self {
            total_earned,
            referrals_count: referrals.len(),
            active_levels: active_levels.len(),
            commission_rate: package.map(|p| p.commission_rate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refnet_engine::PackageCatalog;
    use rust_decimal_macros::dec;

    fn referral(address: &str, level: u8, earned: rust_decimal::Decimal, active: bool) -> Referral {
        Referral {
            address: address.to_string(),
            level,
            earned: Amount::new(earned).unwrap(),
            active,
        }
    }

    #[test]
    fn test_dashboard_summary() {
        let referrals = vec![
            referral("0x7a2f...9b3c", 1, dec!(0.015), true),
            referral("0x4d8e...1f2a", 2, dec!(0.008), true),
            referral("0x9c3b...7e4d", 1, dec!(0.023), true),
        ];
        let catalog = PackageCatalog::default();
        let stats = ReferralStats::summarize(&referrals, catalog.get(2)).unwrap();

        assert_eq!(stats.total_earned.value(), dec!(0.046));
        assert_eq!(stats.referrals_count, 3);
        assert_eq!(stats.active_levels, 2);
        assert_eq!(stats.commission_rate.unwrap().to_string(), "5%");
    }

    #[test]
    fn test_inactive_levels_not_counted() {
        let referrals = vec![
            referral("a", 1, dec!(0.01), true),
            referral("b", 3, dec!(0.02), false),
        ];
        let stats = ReferralStats::summarize(&referrals, None).unwrap();

        assert_eq!(stats.total_earned.value(), dec!(0.03));
        assert_eq!(stats.active_levels, 1);
        assert_eq!(stats.commission_rate, None);
    }

    #[test]
    fn test_empty() {
        let stats = ReferralStats::summarize(&[], None).unwrap();
        assert!(stats.total_earned.is_zero());
        assert_eq!(stats.referrals_count, 0);
        assert_eq!(stats.active_levels, 0);
    }

    #[test]
    fn test_earnings_overflow_is_an_error() {
        let referrals = vec![
            referral("a", 1, rust_decimal::Decimal::MAX, true),
            referral("b", 2, dec!(1), true),
        ];
        assert_eq!(
            ReferralStats::summarize(&referrals, None),
            Err(ReferralError::Overflow)
        );
    }
}
