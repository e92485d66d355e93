//! Membership packages
//!
//! A package is a one-time purchase that grants a referral commission rate
//! and a depth of referral levels the holder earns from.

use crate::error::{EngineError, EngineResult};
use refnet_core::{Amount, Asset, Rate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Starter,
    Professional,
    Vip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub name: String,
    pub tier: PackageTier,
    /// Price per accepted asset. Assets missing here cannot buy the package.
    pub prices: BTreeMap<Asset, Amount>,
    /// Commission the holder earns on downstream purchases
    pub commission_rate: Rate,
    /// How deep in the referral tree the holder earns commission
    pub referral_levels: u8,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl Package {
    pub fn price(&self, asset: Asset) -> Option<Amount> {
        self.prices.get(&asset).copied()
    }

    pub fn accepts(&self, asset: Asset) -> bool {
        self.prices.contains_key(&asset)
    }
}

/// Packages keyed by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Package>", into = "Vec<Package>")]
pub struct PackageCatalog {
    packages: BTreeMap<u32, Package>,
}

impl PackageCatalog {
    pub fn new(packages: Vec<Package>) -> EngineResult<Self> {
        let mut map = BTreeMap::new();
        for package in packages {
            let id = package.id;
            if map.insert(id, package).is_some() {
                return Err(EngineError::DuplicatePackage(id));
            }
        }
        Ok(Self { packages: map })
    }

    pub fn get(&self, id: u32) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Look up a package, failing with `UnknownPackage`
    pub fn require(&self, id: u32) -> EngineResult<&Package> {
        self.get(id).ok_or(EngineError::UnknownPackage(id))
    }

    /// Packages in id order
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl TryFrom<Vec<Package>> for PackageCatalog {
    type Error = EngineError;

    fn try_from(packages: Vec<Package>) -> Result<Self, Self::Error> {
        Self::new(packages)
    }
}

impl From<PackageCatalog> for Vec<Package> {
    fn from(catalog: PackageCatalog) -> Self {
        catalog.packages.into_values().collect()
    }
}

fn prices(bnb: rust_decimal::Decimal, btc: rust_decimal::Decimal) -> BTreeMap<Asset, Amount> {
    BTreeMap::from([
        (Asset::Bnb, Amount::new_unchecked(bnb)),
        (Asset::Btc, Amount::new_unchecked(btc)),
    ])
}

impl Default for PackageCatalog {
    /// Starter / Professional / VIP as sold on the landing page
    fn default() -> Self {
        let packages = [
            Package {
                id: 1,
                name: "Starter".to_string(),
                tier: PackageTier::Starter,
                prices: prices(dec!(0.1), dec!(0.0015)),
                commission_rate: Rate::new_unchecked(dec!(0.03)),
                referral_levels: 1,
                benefits: vec![
                    "1 referral level".to_string(),
                    "Base commission".to_string(),
                    "Weekly payouts".to_string(),
                ],
            },
            Package {
                id: 2,
                name: "Professional".to_string(),
                tier: PackageTier::Professional,
                prices: prices(dec!(0.5), dec!(0.0075)),
                commission_rate: Rate::new_unchecked(dec!(0.05)),
                referral_levels: 3,
                benefits: vec![
                    "3 referral levels".to_string(),
                    "Increased commission".to_string(),
                    "Daily payouts".to_string(),
                    "Priority support".to_string(),
                ],
            },
            Package {
                id: 3,
                name: "VIP".to_string(),
                tier: PackageTier::Vip,
                prices: prices(dec!(1.0), dec!(0.015)),
                commission_rate: Rate::new_unchecked(dec!(0.10)),
                referral_levels: 5,
                benefits: vec![
                    "5 referral levels".to_string(),
                    "Maximum commission".to_string(),
                    "Instant payouts".to_string(),
                    "VIP support".to_string(),
                    "Volume bonuses".to_string(),
                ],
            },
        ];

        Self {
            packages: packages.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}
