//! Catalog Responses

use paddock::{
    pricing::{TierPrices, resolve_price},
    subscriptions::Subscription,
};
use paddock_app::domain::catalog::records::{CatalogItemRecord, HorseRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::MoneyResponse;

/// Price for every tier
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TierPricesResponse {
    pub base: MoneyResponse,

    pub premium: MoneyResponse,

    pub pro: MoneyResponse,
}

impl From<&TierPrices> for TierPricesResponse {
    fn from(prices: &TierPrices) -> Self {
        Self {
            base: prices.base().into(),
            premium: prices.premium().into(),
            pro: prices.pro().into(),
        }
    }
}

/// Catalog Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemResponse {
    pub uuid: Uuid,

    pub name: String,

    pub unit: String,

    pub stock: u32,

    pub prices: TierPricesResponse,

    /// Price the caller would pay now
    pub your_price: MoneyResponse,
}

impl CatalogItemResponse {
    pub(crate) fn new(item: &CatalogItemRecord, subscription: Subscription) -> Self {
        Self {
            uuid: item.uuid.into(),
            name: item.name.clone(),
            unit: item.unit.as_str().to_string(),
            stock: item.stock,
            prices: TierPricesResponse::from(&item.prices),
            your_price: resolve_price(&item.prices, subscription).into(),
        }
    }
}

/// Horse Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HorseResponse {
    pub uuid: Uuid,

    pub name: String,

    pub breed: String,

    pub available: bool,

    /// Hourly rate for every tier
    pub rates: TierPricesResponse,

    /// Hourly rate the caller would pay now
    pub your_rate: MoneyResponse,
}

impl HorseResponse {
    pub(crate) fn new(horse: &HorseRecord, subscription: Subscription) -> Self {
        Self {
            uuid: horse.uuid.into(),
            name: horse.name.clone(),
            breed: horse.breed.clone(),
            available: horse.is_bookable(),
            rates: TierPricesResponse::from(&horse.rates),
            your_rate: resolve_price(&horse.rates, subscription).into(),
        }
    }
}
