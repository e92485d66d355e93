//! RefNet Engine - Ledger validation & fee engine
//!
//! Decides whether a deposit, withdrawal or package purchase is admissible
//! and computes the fee and net settlement amount. Evaluation is a pure
//! function of the request and the asset configuration: nothing here
//! moves funds, persists state, or talks to the network.
//!
//! # Key Types
//! - [`AssetConfig`]: per-asset minimums, fee rates and display precision
//! - [`Package`] / [`PackageCatalog`]: membership tiers and their prices
//! - [`OperationRequest`] / [`OperationResult`]: input and verdict
//! - [`evaluate`]: the stateless evaluation
//! - [`FeeEngine`]: evaluation against a loaded [`EngineConfig`]

pub mod asset_config;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod operation;
pub mod package;

pub use asset_config::AssetConfig;
pub use config::EngineConfig;
pub use engine::{FeeEngine, FeeKind, Quote};
pub use error::EngineError;
pub use evaluate::evaluate;
pub use operation::{Operation, OperationKind, OperationRequest, OperationResult, Rejection};
pub use package::{Package, PackageCatalog, PackageTier};
