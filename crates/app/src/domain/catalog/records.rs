//! Catalog Records

use std::{fmt, str::FromStr};

use paddock::pricing::TierPrices;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Catalog item UUID
pub type CatalogItemUuid = TypedUuid<CatalogItemRecord>;

/// Horse UUID
pub type HorseUuid = TypedUuid<HorseRecord>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown unit: {0}")]
pub struct UnknownUnit(pub String);

/// Unit an item is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Kg,
    Piece,
    Pack,
    Liter,
    Bag,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Piece => "piece",
            Unit::Pack => "pack",
            Unit::Liter => "liter",
            Unit::Bag => "bag",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Unit::Kg),
            "piece" => Ok(Unit::Piece),
            "pack" => Ok(Unit::Pack),
            "liter" => Ok(Unit::Liter),
            "bag" => Ok(Unit::Bag),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}

/// Catalog Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItemRecord {
    pub uuid: CatalogItemUuid,
    pub name: String,
    pub unit: Unit,
    pub prices: TierPrices,
    pub stock: u32,
}

/// Horse Record
#[derive(Debug, Clone, PartialEq)]
pub struct HorseRecord {
    pub uuid: HorseUuid,
    pub name: String,
    pub breed: String,
    /// Hourly rates per tier.
    pub rates: TierPrices,
    pub is_active: bool,
    pub is_available: bool,
}

impl HorseRecord {
    /// Whether the horse can take new bookings.
    pub fn is_bookable(&self) -> bool {
        self.is_active && self.is_available
    }
}
