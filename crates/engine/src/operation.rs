//! Operation requests and their evaluation results

use crate::package::Package;
use refnet_core::{Amount, Asset};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// What the actor wants to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Deposit,
    Withdraw {
        destination: String,
    },
    BuyPackage {
        package: Package,
        /// Opaque referral code, passed through for downstream attribution
        #[serde(default)]
        referrer: Option<String>,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Deposit => OperationKind::Deposit,
            Operation::Withdraw { .. } => OperationKind::Withdraw,
            Operation::BuyPackage { .. } => OperationKind::BuyPackage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    Deposit,
    Withdraw,
    BuyPackage,
}

/// A single evaluation input.
///
/// `amount` is the raw text the user entered; parsing it is part of
/// evaluation. `balance` is the caller's snapshot of the actor's available
/// funds in `asset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub operation: Operation,
    pub asset: Asset,
    pub amount: String,
    pub balance: Amount,
}

impl OperationRequest {
    pub fn deposit(asset: Asset, amount: impl Into<String>, balance: Amount) -> Self {
        Self {
            operation: Operation::Deposit,
            asset,
            amount: amount.into(),
            balance,
        }
    }

    pub fn withdraw(
        asset: Asset,
        amount: impl Into<String>,
        balance: Amount,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            operation: Operation::Withdraw {
                destination: destination.into(),
            },
            asset,
            amount: amount.into(),
            balance,
        }
    }

    /// Package purchase at the listed price (empty amount)
    pub fn buy_package(
        package: Package,
        asset: Asset,
        balance: Amount,
        referrer: Option<String>,
    ) -> Self {
        Self {
            operation: Operation::BuyPackage { package, referrer },
            asset,
            amount: String::new(),
            balance,
        }
    }

    /// Set the entered amount
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }
}

/// Why a request is inadmissible. All of these are user-correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    InvalidAmount,
    BelowMinimum,
    InsufficientBalance,
    MissingAddress,
    UnsupportedAsset,
    PriceMismatch,
    AssetMismatch,
}

impl Rejection {
    /// Stable reason string shown to the user
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::InvalidAmount => "invalid amount",
            Rejection::BelowMinimum => "below minimum",
            Rejection::InsufficientBalance => "insufficient balance",
            Rejection::MissingAddress => "missing address",
            Rejection::UnsupportedAsset => "unsupported asset for package",
            Rejection::PriceMismatch => "price mismatch",
            Rejection::AssetMismatch => "asset mismatch",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Verdict of an evaluation.
///
/// For an admissible withdrawal or deposit `net + fee == due`. Package
/// purchases carry no fee, so `net == due` is the full price. Rejected
/// results carry zero amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub kind: OperationKind,
    pub asset: Asset,
    pub admissible: bool,
    pub fee: Amount,
    pub net: Amount,
    /// Amount the actor transfers (deposit, package) or is debited (withdraw)
    pub due: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
}

impl OperationResult {
    pub fn admitted(kind: OperationKind, asset: Asset, due: Amount, fee: Amount, net: Amount) -> Self {
        Self {
            kind,
            asset,
            admissible: true,
            fee,
            net,
            due,
            referrer: None,
            reason: None,
        }
    }

    pub fn rejected(kind: OperationKind, asset: Asset, reason: Rejection) -> Self {
        Self {
            kind,
            asset,
            admissible: false,
            fee: Amount::ZERO,
            net: Amount::ZERO,
            due: Amount::ZERO,
            referrer: None,
            reason: Some(reason),
        }
    }

    pub fn with_referrer(mut self, referrer: Option<String>) -> Self {
        self.referrer = referrer;
        self
    }

    /// Reason string, if rejected
    pub fn reason_text(&self) -> Option<&'static str> {
        self.reason.map(|r| r.reason())
    }
}
