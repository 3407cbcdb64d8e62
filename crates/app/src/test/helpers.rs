//! Test Helpers
//!
//! Catalog and profile rows are owned by other systems, so tests write them
//! with plain SQL.

use paddock::subscriptions::{Subscription, Tier};
use sqlx::query;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartLine, records::CartLineRecord},
        catalog::records::{CatalogItemUuid, HorseUuid, Unit},
        profiles::records::UserUuid,
    },
    test::TestContext,
};

pub(crate) async fn create_profile(
    ctx: &TestContext,
    user: UserUuid,
    tier: Tier,
    active: bool,
) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO user_profiles (user_uuid, subscription_tier, subscription_active) \
         VALUES ($1, $2, $3)",
    )
    .bind(user.into_uuid())
    .bind(tier.as_str())
    .bind(active)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

/// Catalog item prices in kopecks.
#[derive(Debug, Clone)]
pub(crate) struct ItemFixture {
    pub name: &'static str,
    pub unit: Unit,
    pub base: i64,
    pub premium: i64,
    pub pro: i64,
}

impl ItemFixture {
    pub(crate) fn new(name: &'static str, base: i64, premium: i64, pro: i64) -> Self {
        Self {
            name,
            unit: Unit::Kg,
            base,
            premium,
            pro,
        }
    }
}

pub(crate) async fn create_item(
    ctx: &TestContext,
    item: ItemFixture,
) -> Result<CatalogItemUuid, sqlx::Error> {
    let uuid = CatalogItemUuid::new();

    query(
        "INSERT INTO catalog_items (uuid, name, unit, currency, base_price, premium_price, pro_price, stock) \
         VALUES ($1, $2, $3, 'RUB', $4, $5, $6, 100)",
    )
    .bind(uuid.into_uuid())
    .bind(item.name)
    .bind(item.unit.as_str())
    .bind(item.base)
    .bind(item.premium)
    .bind(item.pro)
    .execute(ctx.db.pool())
    .await?;

    Ok(uuid)
}

pub(crate) async fn set_item_prices(
    ctx: &TestContext,
    item: CatalogItemUuid,
    base: i64,
    premium: i64,
    pro: i64,
) -> Result<(), sqlx::Error> {
    query(
        "UPDATE catalog_items SET base_price = $2, premium_price = $3, pro_price = $4 \
         WHERE uuid = $1",
    )
    .bind(item.into_uuid())
    .bind(base)
    .bind(premium)
    .bind(pro)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

/// Horse with the standard hourly rates: 2000, 1700 and 1500 RUB.
#[derive(Debug, Clone)]
pub(crate) struct HorseFixture {
    pub name: &'static str,
    pub is_active: bool,
    pub is_available: bool,
    pub pro_rate: i64,
}

impl HorseFixture {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            is_active: true,
            is_available: true,
            pro_rate: 1_500_00,
        }
    }
}

pub(crate) async fn create_horse(
    ctx: &TestContext,
    horse: HorseFixture,
) -> Result<HorseUuid, sqlx::Error> {
    let uuid = HorseUuid::new();

    query(
        "INSERT INTO horses (uuid, name, breed, currency, is_active, is_available, pro_rate) \
         VALUES ($1, $2, 'Trakehner', 'RUB', $3, $4, $5)",
    )
    .bind(uuid.into_uuid())
    .bind(horse.name)
    .bind(horse.is_active)
    .bind(horse.is_available)
    .bind(horse.pro_rate)
    .execute(ctx.db.pool())
    .await?;

    Ok(uuid)
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    subscription: Subscription,
    item: CatalogItemUuid,
    quantity: u32,
) -> Result<CartLineRecord, CartsServiceError> {
    ctx.carts
        .add_item(user, subscription, NewCartLine { item, quantity })
        .await
}

pub(crate) async fn count_orders(ctx: &TestContext, user: UserUuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_uuid = $1")
        .bind(user.into_uuid())
        .fetch_one(ctx.db.pool())
        .await
}
