//! Stateless evaluation of a single operation request

use crate::asset_config::AssetConfig;
use crate::operation::{Operation, OperationKind, OperationRequest, OperationResult, Rejection};
use crate::package::Package;
use refnet_core::{Amount, Rate};

/// Evaluate a request against the configuration of its asset.
///
/// Pure: no I/O, no mutation, identical inputs give identical results.
/// Checks run in a fixed order so the first failing rule is the one
/// reported: amount format, then minimum, then balance, then address.
pub fn evaluate(request: &OperationRequest, asset: &AssetConfig) -> OperationResult {
    let kind = request.operation.kind();

    if request.asset != asset.asset {
        return OperationResult::rejected(kind, request.asset, Rejection::AssetMismatch);
    }

    match &request.operation {
        Operation::Deposit => evaluate_deposit(request, asset),
        Operation::Withdraw { destination } => evaluate_withdraw(request, asset, destination),
        Operation::BuyPackage { package, referrer } => {
            evaluate_purchase(request, package).with_referrer(referrer.clone())
        }
    }
}

/// Deposit: informational estimate of what will be credited
fn evaluate_deposit(request: &OperationRequest, config: &AssetConfig) -> OperationResult {
    let kind = OperationKind::Deposit;
    let amount = match Amount::parse(&request.amount) {
        Ok(amount) => amount,
        Err(_) => return OperationResult::rejected(kind, config.asset, Rejection::InvalidAmount),
    };

    if amount < config.deposit_min {
        return OperationResult::rejected(kind, config.asset, Rejection::BelowMinimum);
    }

    settle(kind, config, amount, config.deposit_fee_rate)
}

fn evaluate_withdraw(
    request: &OperationRequest,
    config: &AssetConfig,
    destination: &str,
) -> OperationResult {
    let kind = OperationKind::Withdraw;
    let amount = match Amount::parse(&request.amount) {
        Ok(amount) => amount,
        Err(_) => return OperationResult::rejected(kind, config.asset, Rejection::InvalidAmount),
    };

    if amount < config.withdraw_min {
        return OperationResult::rejected(kind, config.asset, Rejection::BelowMinimum);
    }

    if amount > request.balance {
        return OperationResult::rejected(kind, config.asset, Rejection::InsufficientBalance);
    }

    if destination.trim().is_empty() {
        return OperationResult::rejected(kind, config.asset, Rejection::MissingAddress);
    }

    settle(kind, config, amount, config.withdraw_fee_rate)
}

/// Package purchase: the full price is due, no fee is taken.
///
/// Balance is not checked; the purchase is paid out-of-band from the
/// actor's wallet.
fn evaluate_purchase(request: &OperationRequest, package: &Package) -> OperationResult {
    let kind = OperationKind::BuyPackage;
    let asset = request.asset;

    let Some(price) = package.price(asset) else {
        return OperationResult::rejected(kind, asset, Rejection::UnsupportedAsset);
    };

    if !request.amount.trim().is_empty() {
        match Amount::parse(&request.amount) {
            Ok(amount) if amount == price => {}
            Ok(_) => return OperationResult::rejected(kind, asset, Rejection::PriceMismatch),
            Err(_) => return OperationResult::rejected(kind, asset, Rejection::InvalidAmount),
        }
    }

    OperationResult::admitted(kind, asset, price, Amount::ZERO, price)
}

/// fee = amount × rate, net = amount − fee, both in full precision
fn settle(kind: OperationKind, config: &AssetConfig, amount: Amount, rate: Rate) -> OperationResult {
    let fee = rate.apply(amount);
    let net = fee.and_then(|fee| amount.checked_sub(&fee));

    match (fee, net) {
        (Some(fee), Some(net)) => OperationResult::admitted(kind, config.asset, amount, fee, net),
        // Only reachable when amount × rate overflows the decimal range
        _ => OperationResult::rejected(kind, config.asset, Rejection::InvalidAmount),
    }
}
