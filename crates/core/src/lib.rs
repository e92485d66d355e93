//! RefNet Core - Domain types
//!
//! This crate contains the value objects shared by every RefNet crate:
//! - `Amount`: Non-negative decimal wrapper for asset amounts
//! - `Asset`: Supported crypto assets
//! - `Rate`: Fraction in `[0, 1)` used for fees and commissions

pub mod amount;
pub mod asset;
pub mod rate;

pub use amount::{Amount, AmountError};
pub use asset::{Asset, AssetError};
pub use rate::{Rate, RateError};
