//! Per-asset operation limits and fee rates

use refnet_core::{Amount, Asset, Rate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minimums and fee rates for one asset.
///
/// Fee rates are fixed per asset and per operation kind. Amounts are kept
/// in full precision; `display_precision` only applies to [`Self::display`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub asset: Asset,
    pub deposit_min: Amount,
    pub withdraw_min: Amount,
    pub deposit_fee_rate: Rate,
    pub withdraw_fee_rate: Rate,
    /// Decimal places shown to users
    pub display_precision: u32,
}

impl AssetConfig {
    /// Built-in limits for an asset.
    ///
    /// Deposits carry a 10% fee and withdrawals 5% on every asset.
    pub fn default_for(asset: Asset) -> Self {
        let (deposit_min, withdraw_min) = match asset {
            Asset::Bnb => (dec!(0.01), dec!(0.01)),
            Asset::Btc => (dec!(0.0001), dec!(0.001)),
            Asset::Eth => (dec!(0.005), dec!(0.01)),
            Asset::Usdt => (dec!(10), dec!(10)),
        };

        Self {
            asset,
            deposit_min: Amount::new_unchecked(deposit_min),
            withdraw_min: Amount::new_unchecked(withdraw_min),
            deposit_fee_rate: Rate::new_unchecked(dec!(0.10)),
            withdraw_fee_rate: Rate::new_unchecked(dec!(0.05)),
            display_precision: asset.display_precision(),
        }
    }

    /// Format an amount for presentation, e.g. `0.0025 BTC`.
    pub fn display(&self, amount: Amount) -> String {
        format!(
            "{} {}",
            amount.round_for_display(self.display_precision),
            self.asset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let bnb = AssetConfig::default_for(Asset::Bnb);
        assert_eq!(bnb.withdraw_min.value(), dec!(0.01));
        assert_eq!(bnb.withdraw_fee_rate.value(), dec!(0.05));
        assert_eq!(bnb.deposit_fee_rate.value(), dec!(0.10));
        assert_eq!(bnb.display_precision, 6);
    }

    #[test]
    fn test_display_rounds_only_presentation() {
        let btc = AssetConfig::default_for(Asset::Btc);
        let amount = Amount::new(dec!(0.000000015)).unwrap();
        assert_eq!(btc.display(amount), "0.00000002 BTC");
        assert_eq!(amount.value(), dec!(0.000000015));

        let usdt = AssetConfig::default_for(Asset::Usdt);
        assert_eq!(usdt.display(Amount::new(dec!(12.345)).unwrap()), "12.35 USDT");
    }
}
