//! Report errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Withdrawal ticket not found: {0}")]
    TicketNotFound(u64),

    #[error("Withdrawal ticket {id} already {status}")]
    AlreadyResolved { id: u64, status: String },

    #[error("Only admitted withdrawals can be queued: {0}")]
    Inadmissible(String),

    #[error("Earnings rate must be in [0, 1]: {0}")]
    InvalidEarningsRate(rust_decimal::Decimal),

    #[error("{asset} {kind} total overflowed")]
    Overflow {
        asset: refnet_core::Asset,
        kind: String,
    },
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
