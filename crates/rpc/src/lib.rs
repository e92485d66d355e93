//! RefNet RPC - Backend payloads and CLI orchestrator
//!
//! This crate provides the `refnet` binary, the command implementations
//! behind it, and the typed JSON payloads exchanged with the platform
//! backend. Sending the payloads is left to the caller.

pub mod commands;
pub mod context;
pub mod payload;

pub use context::AppContext;
pub use payload::{ActionPayload, ActionResponse, PayloadError};
