//! Engine configuration
//!
//! The asset table and package catalog are data, not code. Both fall back
//! to the built-in platform defaults when omitted from the JSON file.

use crate::asset_config::AssetConfig;
use crate::error::{EngineError, EngineResult};
use crate::package::PackageCatalog;
use refnet_core::Asset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use strum::IntoEnumIterator;

/// Configuration for the fee engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-asset limits and fee rates
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,

    /// Membership packages
    #[serde(default)]
    pub packages: PackageCatalog,
}

fn default_assets() -> Vec<AssetConfig> {
    Asset::iter().map(AssetConfig::default_for).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            packages: PackageCatalog::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot evaluate against.
    ///
    /// Rates and amounts are range-checked on deserialization; this covers
    /// the cross-entry rules.
    pub fn validate(&self) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for config in &self.assets {
            if !seen.insert(config.asset) {
                return Err(EngineError::DuplicateAsset(config.asset));
            }
            if config.display_precision > 18 {
                return Err(EngineError::InvalidConfig(format!(
                    "display_precision {} for {} exceeds 18",
                    config.display_precision, config.asset
                )));
            }
        }

        for package in self.packages.iter() {
            if package.prices.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "package {} has no prices",
                    package.id
                )));
            }
            if package.referral_levels == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "package {} grants no referral levels",
                    package.id
                )));
            }
        }

        Ok(())
    }

    pub fn asset(&self, asset: Asset) -> Option<&AssetConfig> {
        self.assets.iter().find(|c| c.asset == asset)
    }
}
