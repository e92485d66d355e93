//! Engine errors
//!
//! These are configuration and lookup failures. User-correctable input
//! problems are not errors; they come back as a [`crate::Rejection`] inside
//! an [`crate::OperationResult`].

use refnet_core::Asset;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No configuration for asset {0}")]
    UnknownAsset(Asset),

    #[error("Unknown package: {0}")]
    UnknownPackage(u32),

    #[error("Asset configured twice: {0}")]
    DuplicateAsset(Asset),

    #[error("Package id used twice: {0}")]
    DuplicatePackage(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
