//! Cart Lines Repository

use paddock::cart::CartLine;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    columns::{to_sql_count, try_get_amount, try_get_count, try_get_currency, try_get_parsed},
    domain::{
        carts::records::{CartLineRecord, CartLineUuid, CartUuid},
        catalog::records::CatalogItemUuid,
        profiles::records::UserUuid,
    },
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const SAVE_CART_LINE_SQL: &str = include_str!("../sql/save_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("../sql/delete_cart_lines.sql");
const COUNT_CART_LINES_SQL: &str = include_str!("../sql/count_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert the line, or overwrite its quantity and snapshot price.
    pub(crate) async fn save_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: &CartLine,
    ) -> Result<(), sqlx::Error> {
        let price = line.price_at_addition();

        query(SAVE_CART_LINE_SQL)
            .bind(line.uuid())
            .bind(cart.into_uuid())
            .bind(line.item())
            .bind(to_sql_count("quantity", line.quantity())?)
            .bind(price.to_minor_units())
            .bind(price.currency().iso_alpha_code)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(cart.into_uuid())
            .bind(line.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Number of distinct lines in the user's cart.
    pub(crate) async fn count_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(COUNT_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "line_count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency = try_get_currency(row, "currency")?;

        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            item: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_name: row.try_get("item_name")?,
            unit: try_get_parsed(row, "unit")?,
            quantity: try_get_count(row, "quantity")?,
            price_at_addition: try_get_amount(row, "price_at_addition", currency)?,
        })
    }
}
