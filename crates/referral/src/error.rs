//! Referral errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferralError {
    #[error("Empty referral code")]
    EmptyCode,

    #[error("Invalid referral code (ASCII letters and digits only): {0}")]
    InvalidCode(String),

    #[error("Referral earnings overflowed")]
    Overflow,
}
