//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use paddock::{
    orders::{ContactDetails, OrderNumber, OrderStatus, PaymentMethod},
    settlement::Settlement,
    subscriptions::Tier,
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    columns::{to_sql_count, try_get_amount, try_get_count, try_get_currency, try_get_parsed},
    domain::{
        carts::records::CartLineRecord,
        catalog::records::CatalogItemUuid,
        orders::records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid},
        profiles::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("sql/mark_order_paid.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");

/// Values written to a new order row.
#[derive(Debug)]
pub(crate) struct OrderInsert<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) order_number: &'a OrderNumber,
    pub(crate) user: UserUuid,
    pub(crate) contact: &'a ContactDetails,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) settlement: &'a Settlement,
    pub(crate) promo_code: Option<&'a str>,
    pub(crate) notes: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order. `None` when the order number is already taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderInsert<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let contact = order.contact;
        let settlement = order.settlement;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number.as_str())
            .bind(order.user.into_uuid())
            .bind(contact.name.trim())
            .bind(contact.phone.trim())
            .bind(contact.email.as_deref())
            .bind(contact.city.trim())
            .bind(contact.street.trim())
            .bind(contact.house.trim())
            .bind(contact.apartment.as_deref())
            .bind(contact.postal_index.as_deref())
            .bind(settlement.delivery_method.as_str())
            .bind(order.payment_method.as_str())
            .bind(settlement.total.currency().iso_alpha_code)
            .bind(settlement.subtotal.to_minor_units())
            .bind(settlement.discount.to_minor_units())
            .bind(settlement.delivery_cost.to_minor_units())
            .bind(settlement.assembly_cost.to_minor_units())
            .bind(settlement.total.to_minor_units())
            .bind(settlement.subscription_applied.map(Tier::as_str))
            .bind(settlement.subscription_savings().to_minor_units())
            .bind(order.promo_code)
            .bind(order.notes)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &CartLineRecord,
    ) -> Result<OrderLineRecord, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(CREATE_ORDER_LINE_SQL)
            .bind(OrderLineUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.item.into_uuid())
            .bind(&line.item_name)
            .bind(to_sql_count("quantity", line.quantity)?)
            .bind(line.price_at_addition.to_minor_units())
            .bind(line.price_at_addition.currency().iso_alpha_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(MARK_ORDER_PAID_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lines of every given order, grouped by order.
    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderLineRecord>(GET_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency = try_get_currency(row, "currency")?;

        let subscription_applied = row
            .try_get::<Option<String>, _>("subscription_applied")?
            .map(|tier| {
                tier.parse::<Tier>().map_err(|e| sqlx::Error::ColumnDecode {
                    index: "subscription_applied".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: OrderNumber::from_string(row.try_get("order_number")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            contact: ContactDetails {
                name: row.try_get("customer_name")?,
                phone: row.try_get("customer_phone")?,
                email: row.try_get("customer_email")?,
                city: row.try_get("delivery_city")?,
                street: row.try_get("delivery_street")?,
                house: row.try_get("delivery_house")?,
                apartment: row.try_get("delivery_apartment")?,
                postal_index: row.try_get("delivery_index")?,
            },
            delivery_method: try_get_parsed(row, "delivery_method")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            subtotal: try_get_amount(row, "subtotal", currency)?,
            discount: try_get_amount(row, "discount", currency)?,
            delivery_cost: try_get_amount(row, "delivery_cost", currency)?,
            assembly_cost: try_get_amount(row, "assembly_cost", currency)?,
            total: try_get_amount(row, "total", currency)?,
            subscription_applied,
            subscription_savings: try_get_amount(row, "subscription_savings", currency)?,
            status: try_get_parsed(row, "status")?,
            is_paid: row.try_get("is_paid")?,
            promo_code: row.try_get("promo_code")?,
            notes: row.try_get("notes")?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency = try_get_currency(row, "currency")?;

        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_name: row.try_get("item_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price", currency)?,
        })
    }
}
