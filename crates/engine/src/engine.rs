//! Fee engine bound to a configuration

use crate::asset_config::AssetConfig;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::evaluate::evaluate;
use crate::operation::{OperationRequest, OperationResult};
use crate::package::PackageCatalog;
use refnet_core::{Amount, Asset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which fee schedule a quote uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    Deposit,
    Withdraw,
}

/// Fee breakdown for an amount, without admissibility checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub asset: Asset,
    pub amount: Amount,
    pub fee: Amount,
    pub net: Amount,
}

/// Evaluates requests against a validated [`EngineConfig`].
///
/// Holds no mutable state; share it behind an `Arc` freely.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    assets: BTreeMap<Asset, AssetConfig>,
    packages: PackageCatalog,
}

impl FeeEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        Self {
            assets: config.assets.into_iter().map(|c| (c.asset, c)).collect(),
            packages: config.packages,
        }
    }

    pub fn asset(&self, asset: Asset) -> EngineResult<&AssetConfig> {
        self.assets.get(&asset).ok_or(EngineError::UnknownAsset(asset))
    }

    /// Configured assets in symbol order
    pub fn assets(&self) -> impl Iterator<Item = &AssetConfig> {
        self.assets.values()
    }

    pub fn packages(&self) -> &PackageCatalog {
        &self.packages
    }

    /// Evaluate a request.
    ///
    /// `Err` only when the engine has no configuration for the asset;
    /// input problems come back as a rejected result.
    pub fn evaluate(&self, request: &OperationRequest) -> EngineResult<OperationResult> {
        let config = self.asset(request.asset)?;
        let result = evaluate(request, config);

        match result.reason {
            Some(reason) => tracing::debug!(
                kind = %result.kind,
                asset = %request.asset,
                amount = %request.amount,
                reason = reason.reason(),
                "Operation rejected"
            ),
            None => tracing::debug!(
                kind = %result.kind,
                asset = %request.asset,
                due = %result.due,
                fee = %result.fee,
                "Operation admitted"
            ),
        }

        Ok(result)
    }

    /// Build a package purchase request from the catalog
    pub fn buy_package_request(
        &self,
        package_id: u32,
        asset: Asset,
        balance: Amount,
        referrer: Option<String>,
    ) -> EngineResult<OperationRequest> {
        let package = self.packages.require(package_id)?.clone();
        Ok(OperationRequest::buy_package(package, asset, balance, referrer))
    }

    /// Fee and net for an amount under the asset's deposit or withdrawal
    /// rate. Used for display next to an input field before the user
    /// submits; minimums and balance are not checked.
    pub fn quote(&self, asset: Asset, amount: Amount, kind: FeeKind) -> EngineResult<Quote> {
        let config = self.asset(asset)?;
        let rate = match kind {
            FeeKind::Deposit => config.deposit_fee_rate,
            FeeKind::Withdraw => config.withdraw_fee_rate,
        };
        let overflow = || EngineError::InvalidConfig(format!("fee overflow for {amount} {asset}"));
        let fee = rate.apply(amount).ok_or_else(overflow)?;
        let net = amount.checked_sub(&fee).ok_or_else(overflow)?;

        Ok(Quote {
            asset,
            amount,
            fee,
            net,
        })
    }
}

impl Default for FeeEngine {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}
