//! RefNet Referral - Referral codes, links and commission accrual
//!
//! Package holders earn a commission on purchases made by users below them
//! in the referral tree, down to the depth their package grants.
//!
//! - [`ReferralCode`]: validated code and shareable link
//! - [`accrue`]: commission owed to each upline referrer for a purchase
//! - [`ReferralStats`]: dashboard summary of a holder's referrals
//!
//! Attribution itself (who referred whom) is backend-owned; this crate
//! only computes from data the caller supplies.

pub mod code;
pub mod commission;
pub mod error;
pub mod stats;

pub use code::{ReferralCode, DEFAULT_BASE_URL};
pub use commission::{accrue, accrue_purchase, Accrual, Upline};
pub use error::ReferralError;
pub use stats::{Referral, ReferralStats};
