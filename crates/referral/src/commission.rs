//! Multi-level commission accrual
//!
//! A referrer at depth `L` above the purchaser (1 = direct referrer) earns
//! `price × commission_rate` of their own package, provided `L` is within
//! the package's referral levels. Referrers without a package earn nothing.

use refnet_core::{Amount, Asset, Rate};
use refnet_engine::{OperationKind, OperationResult, Package};
use serde::{Deserialize, Serialize};

/// One referrer in the chain above a purchaser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upline {
    /// Wallet address or referral code; opaque here
    pub referrer: String,
    /// Package the referrer holds, if any
    pub package: Option<Package>,
}

impl Upline {
    pub fn new(referrer: impl Into<String>, package: Option<Package>) -> Self {
        Self {
            referrer: referrer.into(),
            package,
        }
    }
}

/// Commission owed to one referrer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accrual {
    pub referrer: String,
    pub level: u8,
    pub asset: Asset,
    pub rate: Rate,
    pub amount: Amount,
}

/// Commissions for a purchase of `price` in `asset`.
///
/// `upline[0]` is the direct referrer. Output preserves upline order and
/// skips referrers who earn nothing at their depth.
pub fn accrue(upline: &[Upline], asset: Asset, price: Amount) -> Vec<Accrual> {
    upline
        .iter()
        .zip(1..=u8::MAX)
        .filter_map(|(node, level)| {
            let package = node.package.as_ref()?;
            if level > package.referral_levels {
                return None;
            }
            let amount = package.commission_rate.apply(price)?;
            if amount.is_zero() {
                return None;
            }
            Some(Accrual {
                referrer: node.referrer.clone(),
                level,
                asset,
                rate: package.commission_rate,
                amount,
            })
        })
        .collect()
}

/// Commissions for an evaluated package purchase.
///
/// Anything other than an admissible purchase accrues nothing.
pub fn accrue_purchase(result: &OperationResult, upline: &[Upline]) -> Vec<Accrual> {
    if !result.admissible || result.kind != OperationKind::BuyPackage {
        return Vec::new();
    }
    let accruals = accrue(upline, result.asset, result.due);
    tracing::debug!(
        asset = %result.asset,
        price = %result.due,
        accruals = accruals.len(),
        "Commission accrued"
    );
    accruals
}

#[cfg(test)]
mod tests {
    use super::*;
    use refnet_engine::{evaluate, AssetConfig, OperationRequest, PackageCatalog};
    use rust_decimal_macros::dec;

    fn package(id: u32) -> Package {
        PackageCatalog::default().get(id).unwrap().clone()
    }

    fn price(value: rust_decimal::Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_direct_referrer_earns_own_rate() {
        let upline = vec![Upline::new("0x7a2f", Some(package(2)))];
        let accruals = accrue(&upline, Asset::Bnb, price(dec!(1.0)));

        assert_eq!(accruals.len(), 1);
        assert_eq!(accruals[0].level, 1);
        assert_eq!(accruals[0].amount.value(), dec!(0.05));
    }

    #[test]
    fn test_depth_limited_by_package_levels() {
        // Starter earns 1 level, Professional 3, VIP 5
        let upline = vec![
            Upline::new("L1", Some(package(1))),
            Upline::new("L2", Some(package(1))),
            Upline::new("L3", Some(package(2))),
            Upline::new("L4", Some(package(2))),
            Upline::new("L5", Some(package(3))),
            Upline::new("L6", Some(package(3))),
        ];
        let accruals = accrue(&upline, Asset::Bnb, price(dec!(0.5)));

        let earners: Vec<(&str, u8)> = accruals
            .iter()
            .map(|a| (a.referrer.as_str(), a.level))
            .collect();
        assert_eq!(earners, vec![("L1", 1), ("L3", 3), ("L5", 5)]);
        assert_eq!(accruals[0].amount.value(), dec!(0.015));
        assert_eq!(accruals[2].amount.value(), dec!(0.05));
    }

    #[test]
    fn test_referrer_without_package_earns_nothing() {
        let upline = vec![
            Upline::new("free", None),
            Upline::new("vip", Some(package(3))),
        ];
        let accruals = accrue(&upline, Asset::Btc, price(dec!(0.015)));

        assert_eq!(accruals.len(), 1);
        assert_eq!(accruals[0].referrer, "vip");
        assert_eq!(accruals[0].level, 2);
        assert_eq!(accruals[0].amount.value(), dec!(0.0015));
    }

    #[test]
    fn test_accrue_purchase_only_for_admitted_purchases() {
        let upline = vec![Upline::new("vip", Some(package(3)))];

        let request = OperationRequest::buy_package(package(1), Asset::Bnb, Amount::ZERO, None);
        let result = evaluate(&request, &AssetConfig::default_for(Asset::Bnb));
        let accruals = accrue_purchase(&result, &upline);
        assert_eq!(accruals.len(), 1);
        assert_eq!(accruals[0].amount.value(), dec!(0.01));

        let request = OperationRequest::deposit(Asset::Bnb, "1", Amount::ZERO);
        let result = evaluate(&request, &AssetConfig::default_for(Asset::Bnb));
        assert!(accrue_purchase(&result, &upline).is_empty());

        let request = OperationRequest::buy_package(package(1), Asset::Usdt, Amount::ZERO, None);
        let result = evaluate(&request, &AssetConfig::default_for(Asset::Usdt));
        assert!(accrue_purchase(&result, &upline).is_empty());
    }
}
