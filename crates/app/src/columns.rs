//! Column decoding helpers.
//!
//! Amounts are stored as `BIGINT` minor units next to a `currency` column.

use std::{error::Error as StdError, str::FromStr};

use paddock::money::{self, Amount};
use rusty_money::{Money, iso::Currency};
use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_currency(row: &PgRow, col: &str) -> Result<&'static Currency, sqlx::Error> {
    let code: String = row.try_get(col)?;

    money::currency(&code).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: format!("unknown currency {code}").into(),
    })
}

pub(crate) fn try_get_amount(
    row: &PgRow,
    col: &str,
    currency: &'static Currency,
) -> Result<Amount, sqlx::Error> {
    let minor: i64 = row.try_get(col)?;

    Ok(Money::from_minor(minor, currency))
}

pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Bind-ready `INTEGER` for a count.
pub(crate) fn to_sql_count(col: &str, value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}

/// Decode a `TEXT` column through the type's `FromStr`.
pub(crate) fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
