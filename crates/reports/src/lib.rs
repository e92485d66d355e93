//! RefNet Reports - Admin dashboard computations
//!
//! - [`summarize`] - platform earnings per period, operation kind and asset
//! - [`WithdrawalQueue`] - admitted withdrawals awaiting admin review
//!
//! Activity records and tickets are supplied by the caller (the backend
//! owns the real history); nothing here persists.

pub mod activity;
pub mod error;
pub mod queue;

pub use activity::{summarize, Activity, ActivityKind, EarningsRate, EarningsSummary, Flow, Period};
pub use error::ReportError;
pub use queue::{Payout, TicketStatus, WithdrawalQueue, WithdrawalTicket};
