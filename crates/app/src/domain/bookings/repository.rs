//! Bookings Repository

use jiff::civil::{Date, Time};
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use paddock::bookings::{BookingPrice, BookingStatus};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    columns::{to_sql_count, try_get_amount, try_get_count, try_get_currency, try_get_parsed},
    domain::{
        bookings::records::{BookingRecord, BookingUuid},
        catalog::records::HorseUuid,
        profiles::records::UserUuid,
    },
};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const LOCK_BOOKING_SQL: &str = include_str!("sql/lock_booking.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("sql/list_bookings.sql");
const UPDATE_BOOKING_SQL: &str = include_str!("sql/update_booking.sql");
const SLOT_TAKEN_SQL: &str = include_str!("sql/slot_taken.sql");

/// Values written to a new booking row.
#[derive(Debug)]
pub(crate) struct BookingInsert<'a> {
    pub(crate) uuid: BookingUuid,
    pub(crate) booking_number: &'a str,
    pub(crate) horse: HorseUuid,
    pub(crate) user: UserUuid,
    pub(crate) date: Date,
    pub(crate) time: Time,
    pub(crate) price: &'a BookingPrice,
    pub(crate) client_name: &'a str,
    pub(crate) client_phone: &'a str,
    pub(crate) comment: Option<&'a str>,
    pub(crate) status: BookingStatus,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a booking. `None` when the booking number is already taken.
    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &BookingInsert<'_>,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        let price = booking.price;

        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.booking_number)
            .bind(booking.horse.into_uuid())
            .bind(booking.user.into_uuid())
            .bind(SqlxDate::from(booking.date))
            .bind(SqlxTime::from(booking.time))
            .bind(to_sql_count("duration_hours", price.duration_hours)?)
            .bind(price.total.currency().iso_alpha_code)
            .bind(price.base_rate.to_minor_units())
            .bind(price.user_rate.to_minor_units())
            .bind(price.discount_percent)
            .bind(price.total.to_minor_units())
            .bind(booking.client_name)
            .bind(booking.client_phone)
            .bind(booking.comment)
            .bind(booking.status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock a booking, optionally only when it belongs to `user`.
    pub(crate) async fn lock_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        user: Option<UserUuid>,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LOCK_BOOKING_SQL)
            .bind(booking.into_uuid())
            .bind(user.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_BOOKINGS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        status: BookingStatus,
        is_paid: bool,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_BOOKING_SQL)
            .bind(booking.into_uuid())
            .bind(status.as_str())
            .bind(is_paid)
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether a pending or confirmed booking holds the slot.
    pub(crate) async fn slot_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        horse: HorseUuid,
        date: Date,
        time: Time,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(SLOT_TAKEN_SQL)
            .bind(horse.into_uuid())
            .bind(SqlxDate::from(date))
            .bind(SqlxTime::from(time))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let currency = try_get_currency(row, "currency")?;

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            booking_number: row.try_get("booking_number")?,
            horse: HorseUuid::from_uuid(row.try_get("horse_uuid")?),
            horse_name: row.try_get("horse_name")?,
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            date: row.try_get::<SqlxDate, _>("booking_date")?.to_jiff(),
            time: row.try_get::<SqlxTime, _>("booking_time")?.to_jiff(),
            price: BookingPrice {
                base_rate: try_get_amount(row, "base_rate", currency)?,
                user_rate: try_get_amount(row, "user_rate", currency)?,
                discount_percent: row.try_get("discount_percent")?,
                duration_hours: try_get_count(row, "duration_hours")?,
                total: try_get_amount(row, "total", currency)?,
            },
            client_name: row.try_get("client_name")?,
            client_phone: row.try_get("client_phone")?,
            comment: row.try_get("comment")?,
            status: try_get_parsed(row, "status")?,
            is_paid: row.try_get("is_paid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
