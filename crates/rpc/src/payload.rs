//! Backend request/response payloads
//!
//! The backend accepts a single POST body tagged by `action`. Payloads are
//! built from admitted engine results so the amounts sent are exactly the
//! ones shown to the user.

use refnet_core::{Amount, Asset};
use refnet_engine::{Operation, OperationKind, OperationRequest, OperationResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Cannot build a payload for a rejected operation: {0}")]
    Inadmissible(&'static str),

    #[error("Expected a {expected} result, got {actual}")]
    WrongKind {
        expected: OperationKind,
        actual: OperationKind,
    },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionPayload {
    BuyPackage {
        package_id: u32,
        amount: Amount,
        crypto: Asset,
        wallet: String,
        /// Empty when the buyer came without a referral code
        #[serde(default)]
        referrer: String,
    },
    Withdraw {
        amount: Amount,
        crypto: Asset,
        from_wallet: String,
        to_wallet: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tx_hash: Option<String>,
    },
}

impl ActionPayload {
    /// Purchase payload; `amount` is the package price
    pub fn buy_package(
        request: &OperationRequest,
        result: &OperationResult,
        wallet: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        check(result, OperationKind::BuyPackage)?;
        let Operation::BuyPackage { package, .. } = &request.operation else {
            return Err(PayloadError::WrongKind {
                expected: OperationKind::BuyPackage,
                actual: request.operation.kind(),
            });
        };

        Ok(Self::BuyPackage {
            package_id: package.id,
            amount: result.due,
            crypto: result.asset,
            wallet: wallet.into(),
            referrer: result.referrer.clone().unwrap_or_default(),
        })
    }

    /// Withdrawal payload; `amount` is the gross amount before fee
    pub fn withdraw(
        request: &OperationRequest,
        result: &OperationResult,
        from_wallet: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        check(result, OperationKind::Withdraw)?;
        let Operation::Withdraw { destination } = &request.operation else {
            return Err(PayloadError::WrongKind {
                expected: OperationKind::Withdraw,
                actual: request.operation.kind(),
            });
        };

        Ok(Self::Withdraw {
            amount: result.due,
            crypto: result.asset,
            from_wallet: from_wallet.into(),
            to_wallet: destination.trim().to_string(),
            tx_hash: None,
        })
    }

    /// Attach the wallet-provider transaction hash to a withdrawal
    pub fn with_tx_hash(mut self, hash: impl Into<String>) -> Self {
        if let Self::Withdraw { tx_hash, .. } = &mut self {
            *tx_hash = Some(hash.into());
        }
        self
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn check(result: &OperationResult, expected: OperationKind) -> Result<(), PayloadError> {
    if result.kind != expected {
        return Err(PayloadError::WrongKind {
            expected,
            actual: result.kind,
        });
    }
    if let Some(reason) = result.reason {
        return Err(PayloadError::Inadmissible(reason.reason()));
    }
    Ok(())
}

/// Backend reply. Only `success` is guaranteed; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }
}
