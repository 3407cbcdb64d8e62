//! Catalog Repository

use paddock::pricing::TierPrices;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    columns::{try_get_amount, try_get_count, try_get_currency, try_get_parsed},
    domain::catalog::records::{CatalogItemRecord, CatalogItemUuid, HorseRecord, HorseUuid},
};

const GET_ITEMS_SQL: &str = include_str!("sql/get_items.sql");
const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_HORSE_SQL: &str = include_str!("sql/get_horse.sql");
const LIST_HORSES_SQL: &str = include_str!("sql/list_horses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        self.get_items(tx, &[item])
            .await?
            .into_iter()
            .next()
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn get_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CatalogItemUuid],
    ) -> Result<Vec<CatalogItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = items.iter().copied().map(CatalogItemUuid::into_uuid).collect();

        query_as::<Postgres, CatalogItemRecord>(GET_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CatalogItemRecord>, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(LIST_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_horse(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        horse: HorseUuid,
    ) -> Result<HorseRecord, sqlx::Error> {
        query_as::<Postgres, HorseRecord>(GET_HORSE_SQL)
            .bind(horse.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_horses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<HorseRecord>, sqlx::Error> {
        query_as::<Postgres, HorseRecord>(LIST_HORSES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn try_get_tier_prices(
    row: &PgRow,
    base: &str,
    premium: &str,
    pro: &str,
) -> Result<TierPrices, sqlx::Error> {
    let currency = try_get_currency(row, "currency")?;

    TierPrices::new(
        try_get_amount(row, base, currency)?,
        try_get_amount(row, premium, currency)?,
        try_get_amount(row, pro, currency)?,
    )
    .map_err(|e| sqlx::Error::ColumnDecode {
        index: base.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CatalogItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CatalogItemUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            unit: try_get_parsed(row, "unit")?,
            prices: try_get_tier_prices(row, "base_price", "premium_price", "pro_price")?,
            stock: try_get_count(row, "stock")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for HorseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: HorseUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            breed: row.try_get("breed")?,
            rates: try_get_tier_prices(row, "base_rate", "premium_rate", "pro_rate")?,
            is_active: row.try_get("is_active")?,
            is_available: row.try_get("is_available")?,
        })
    }
}
