//! Money

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// Monetary amount in a statically known ISO currency.
pub type Amount = Money<'static, Currency>;

/// Errors raised by monetary arithmetic.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// Multiplying or summing minor units left the `i64` range.
    #[error("amount overflowed the representable range")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Amount {
    Money::from_minor(0, currency)
}

/// Look up an ISO currency by its alpha code, e.g. `RUB`.
pub fn currency(code: &str) -> Option<&'static Currency> {
    iso::find(code)
}

/// Multiply a unit price by a quantity.
///
/// # Errors
///
/// Returns [`AmountError::Overflow`] when the product does not fit in minor units.
pub fn times(price: &Amount, quantity: u32) -> Result<Amount, AmountError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(AmountError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Take a percentage of an amount, rounded half away from zero to whole minor units.
///
/// # Errors
///
/// Returns [`AmountError::PercentConversion`] if the calculation overflows.
pub fn percent_of(amount: &Amount, percent: &Percentage) -> Result<Amount, AmountError> {
    let minor = percent_of_minor(percent, amount.to_minor_units())?;

    Ok(Money::from_minor(minor, amount.currency()))
}

/// Calculate a percentage of a minor unit amount.
///
/// # Errors
///
/// Returns [`AmountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, AmountError> {
    let minor = Decimal::from_i64(minor).ok_or(AmountError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(AmountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(AmountError::PercentConversion)
}

/// Express a percentage as points (`0.2` becomes `20`).
pub fn percent_points(percent: &Percentage) -> Decimal {
    (*percent) * Decimal::ONE_HUNDRED
}

/// The larger of two amounts in the same currency.
pub fn max(a: Amount, b: Amount) -> Amount {
    if a.to_minor_units() >= b.to_minor_units() {
        a
    } else {
        b
    }
}

/// Clamp negative amounts to zero.
pub fn non_negative(amount: Amount) -> Amount {
    if amount.to_minor_units() < 0 {
        zero(amount.currency())
    } else {
        amount
    }
}
