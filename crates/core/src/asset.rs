//! Asset - Type-safe crypto asset symbols
//!
//! The platform settles in a fixed set of assets. Unknown symbols are an
//! error rather than a fallback variant: an asset without a fee table can
//! never be evaluated.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Errors that can occur when parsing assets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Empty asset symbol")]
    EmptySymbol,

    #[error("Unsupported asset: {0}")]
    Unsupported(String),
}

/// Supported assets
///
/// # Examples
/// ```
/// use refnet_core::Asset;
///
/// let bnb: Asset = "bnb".parse().unwrap();
/// assert_eq!(bnb, Asset::Bnb);
/// assert_eq!(Asset::Btc.to_string(), "BTC");
/// assert!("DOGE".parse::<Asset>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Asset {
    /// BNB Smart Chain native coin
    Bnb,
    /// Bitcoin
    Btc,
    /// Ethereum
    Eth,
    /// Tether USD
    Usdt,
}

impl Asset {
    /// Returns the asset symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Bnb => "BNB",
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Usdt => "USDT",
        }
    }

    /// Default number of decimal places shown to users
    pub fn display_precision(&self) -> u32 {
        match self {
            Asset::Bnb | Asset::Eth => 6,
            Asset::Btc => 8,
            Asset::Usdt => 2,
        }
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();

        if s.is_empty() {
            return Err(AssetError::EmptySymbol);
        }

        match s.as_str() {
            "BNB" => Ok(Asset::Bnb),
            "BTC" => Ok(Asset::Btc),
            "ETH" => Ok(Asset::Eth),
            "USDT" => Ok(Asset::Usdt),
            _ => Err(AssetError::Unsupported(s)),
        }
    }
}

impl TryFrom<String> for Asset {
    type Error = AssetError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.symbol().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_known_assets() {
        assert_eq!("BNB".parse::<Asset>().unwrap(), Asset::Bnb);
        assert_eq!("btc".parse::<Asset>().unwrap(), Asset::Btc);
        assert_eq!(" eth ".parse::<Asset>().unwrap(), Asset::Eth);
        assert_eq!("Usdt".parse::<Asset>().unwrap(), Asset::Usdt);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Asset>(), Err(AssetError::EmptySymbol)));
        assert!(matches!(
            "DOGE".parse::<Asset>(),
            Err(AssetError::Unsupported(s)) if s == "DOGE"
        ));
    }

    #[test]
    fn test_display_matches_symbol() {
        for asset in Asset::iter() {
            assert_eq!(asset.to_string(), asset.symbol());
        }
    }

    #[test]
    fn test_serde_as_symbol() {
        let json = serde_json::to_string(&Asset::Bnb).unwrap();
        assert_eq!(json, "\"BNB\"");
        let parsed: Asset = serde_json::from_str("\"btc\"").unwrap();
        assert_eq!(parsed, Asset::Btc);
    }
}
