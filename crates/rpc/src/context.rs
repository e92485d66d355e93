//! Application context - wires configuration into the engine

use refnet_engine::{EngineConfig, FeeEngine};
use std::path::Path;

/// Application context shared by all commands
pub struct AppContext {
    pub engine: FeeEngine,
    /// Print JSON instead of human-readable text
    pub json: bool,
}

impl AppContext {
    /// Load the engine from a config file, or use the built-in defaults
    pub fn new(config_path: Option<&Path>, json: bool) -> Result<Self, anyhow::Error> {
        let config = match config_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading engine configuration");
                EngineConfig::from_file(path)?
            }
            None => EngineConfig::default(),
        };

        Ok(Self {
            engine: FeeEngine::new(config)?,
            json,
        })
    }

    pub fn with_engine(engine: FeeEngine, json: bool) -> Self {
        Self { engine, json }
    }
}
