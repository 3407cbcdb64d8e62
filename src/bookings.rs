//! Bookings
//!
//! Hourly horse rental pricing, cancellation rules and per-user statistics.

use std::{fmt, str::FromStr};

use jiff::{
    SignedDuration,
    civil::{Date, DateTime},
};
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    money::{self, Amount, AmountError},
    pricing::{TierPrices, resolve_price},
    subscriptions::Subscription,
};

/// Minimum notice required to cancel a booking.
pub const CANCELLATION_NOTICE: SignedDuration = SignedDuration::from_hours(3);

/// Errors raised by booking rules.
#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    /// Bookings last at least one hour.
    #[error("duration must be at least 1 hour")]
    InvalidDuration,

    /// The booking starts too soon to be cancelled.
    #[error("bookings can only be cancelled at least 3 hours before they start")]
    TooLateToCancel,

    /// The booking is already cancelled or completed.
    #[error("booking is {0} and cannot be cancelled")]
    NotCancellable(BookingStatus),

    /// A stored status was not recognised.
    #[error("unknown booking status: {0}")]
    UnknownStatus(String),

    /// Wrapped monetary arithmetic error.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Booking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed; the default for new bookings.
    #[default]
    Confirmed,
    /// Paid and done.
    Completed,
    /// Cancelled by the customer.
    Cancelled,
}

impl BookingStatus {
    /// Stored name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this status occupies its slot.
    pub fn holds_slot(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Whether the booking's total counts towards money spent.
    pub fn is_billable(self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Completed)
    }

    /// Status after payment is recorded: a paid confirmed booking is completed.
    pub fn after_payment(self) -> BookingStatus {
        match self {
            BookingStatus::Confirmed => BookingStatus::Completed,
            other => other,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(BookingError::UnknownStatus(other.to_string())),
        }
    }
}

/// Frozen price of a booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingPrice {
    /// Hourly base rate.
    pub base_rate: Amount,
    /// Hourly rate the user pays.
    pub user_rate: Amount,
    /// `(base − user) / base × 100`, two decimal places.
    pub discount_percent: Decimal,
    /// Number of hours.
    pub duration_hours: u32,
    /// `user_rate × duration_hours`.
    pub total: Amount,
}

impl BookingPrice {
    /// What the booking would have cost at the base rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the product does not fit.
    pub fn base_total(&self) -> Result<Amount, AmountError> {
        money::times(&self.base_rate, self.duration_hours)
    }

    /// `base_total − total`.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] on overflow.
    pub fn savings(&self) -> Result<Amount, AmountError> {
        Ok(self.base_total()?.sub(self.total)?)
    }
}

/// Price a booking for a subscription snapshot.
///
/// # Errors
///
/// Returns [`BookingError::InvalidDuration`] for a zero duration, or
/// [`BookingError::Amount`] if the total overflows.
pub fn price_booking(
    rates: &TierPrices,
    subscription: Subscription,
    duration_hours: u32,
) -> Result<BookingPrice, BookingError> {
    if duration_hours == 0 {
        return Err(BookingError::InvalidDuration);
    }

    let base_rate = rates.base();
    let user_rate = resolve_price(rates, subscription);

    Ok(BookingPrice {
        base_rate,
        user_rate,
        discount_percent: discount_percent(&base_rate, &user_rate),
        duration_hours,
        total: money::times(&user_rate, duration_hours)?,
    })
}

fn discount_percent(base: &Amount, user: &Amount) -> Decimal {
    let base = Decimal::from(base.to_minor_units());

    if base.is_zero() {
        return Decimal::ZERO;
    }

    let user = Decimal::from(user.to_minor_units());

    ((base - user) / base * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Check whether a booking starting at `starts_at` can be cancelled at `now`.
///
/// Both times are civil times in the business time zone.
///
/// # Errors
///
/// Returns [`BookingError::NotCancellable`] for cancelled or completed
/// bookings, and [`BookingError::TooLateToCancel`] when less than
/// [`CANCELLATION_NOTICE`] remains before the start.
pub fn ensure_cancellable(
    status: BookingStatus,
    starts_at: DateTime,
    now: DateTime,
) -> Result<(), BookingError> {
    if matches!(status, BookingStatus::Cancelled | BookingStatus::Completed) {
        return Err(BookingError::NotCancellable(status));
    }

    if starts_at.duration_since(now) < CANCELLATION_NOTICE {
        return Err(BookingError::TooLateToCancel);
    }

    Ok(())
}

/// Display number for a booking, `BK{YYYYMMDD}{last 8 hex digits of the UUID}`.
///
/// The tail of a v7 UUID is random, unlike its head, which is the creation
/// timestamp and repeats for bookings made close together.
pub fn booking_number(uuid: Uuid, created_on: Date) -> String {
    let tail = uuid.as_u128() & 0xFFFF_FFFF;

    format!("BK{}{tail:08X}", created_on.strftime("%Y%m%d"))
}

/// Aggregate figures for a user's bookings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingStats {
    /// Bookings in any status.
    pub total_bookings: u64,
    /// Bookings currently confirmed.
    pub confirmed_bookings: u64,
    /// Σ totals over confirmed and completed bookings.
    pub total_spent: Amount,
    /// Σ savings over confirmed and completed bookings.
    pub total_savings: Amount,
    /// `total_spent` divided by the number of confirmed and completed bookings.
    pub average_booking_value: Amount,
}

impl BookingStats {
    /// Aggregate bookings given as `(status, frozen price)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] on overflow or currency mismatch.
    pub fn collect<'a>(
        currency: &'static Currency,
        bookings: impl IntoIterator<Item = (BookingStatus, &'a BookingPrice)>,
    ) -> Result<Self, AmountError> {
        let mut total_bookings = 0_u64;
        let mut confirmed_bookings = 0_u64;
        let mut billable = 0_u64;
        let mut total_spent = money::zero(currency);
        let mut total_savings = money::zero(currency);

        for (status, price) in bookings {
            total_bookings += 1;

            if status == BookingStatus::Confirmed {
                confirmed_bookings += 1;
            }

            if status.is_billable() {
                billable += 1;
                total_spent = total_spent.add(price.total)?;
                total_savings = total_savings.add(price.savings()?)?;
            }
        }

        let average_booking_value = if billable == 0 {
            money::zero(currency)
        } else {
            let spent = Decimal::from(total_spent.to_minor_units());
            let count = Decimal::from_u64(billable).ok_or(AmountError::Overflow)?;

            let average = (spent / count)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .ok_or(AmountError::Overflow)?;

            Money::from_minor(average, currency)
        };

        Ok(Self {
            total_bookings,
            confirmed_bookings,
            total_spent,
            total_savings,
            average_booking_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};
    use rusty_money::iso::RUB;
    use testresult::TestResult;

    use crate::subscriptions::Tier;

    use super::*;

    fn rub(minor: i64) -> Amount {
        Money::from_minor(minor, RUB)
    }

    fn horse_rates() -> Result<TierPrices, crate::pricing::PricingError> {
        TierPrices::new(rub(200_000), rub(170_000), rub(150_000))
    }

    #[test]
    fn pro_rider_pays_pro_rate() -> TestResult {
        let price = price_booking(&horse_rates()?, Subscription::active(Tier::Pro), 2)?;

        assert_eq!(price.base_rate, rub(200_000));
        assert_eq!(price.user_rate, rub(150_000));
        assert_eq!(price.discount_percent, Decimal::new(2500, 2));
        assert_eq!(price.total, rub(300_000));
        assert_eq!(price.savings()?, rub(100_000));

        Ok(())
    }

    #[test]
    fn premium_discount_is_rounded_to_two_places() -> TestResult {
        let rates = TierPrices::new(rub(300_000), rub(200_000), rub(100_000))?;

        let price = price_booking(&rates, Subscription::active(Tier::Premium), 1)?;

        assert_eq!(price.discount_percent, Decimal::new(3333, 2));

        Ok(())
    }

    #[test]
    fn free_rider_has_no_discount() -> TestResult {
        let price = price_booking(&horse_rates()?, Subscription::free(), 3)?;

        assert_eq!(price.discount_percent, Decimal::ZERO);
        assert_eq!(price.total, rub(600_000));

        Ok(())
    }

    #[test]
    fn zero_base_rate_has_zero_discount() -> TestResult {
        let rates = TierPrices::new(rub(0), rub(0), rub(0))?;

        let price = price_booking(&rates, Subscription::active(Tier::Pro), 1)?;

        assert_eq!(price.discount_percent, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn zero_duration_is_rejected() -> TestResult {
        let result = price_booking(&horse_rates()?, Subscription::free(), 0);

        assert_eq!(result, Err(BookingError::InvalidDuration));

        Ok(())
    }

    #[test]
    fn cancelling_two_hours_ahead_is_too_late() {
        let now = datetime(2024, 5, 10, 10, 0, 0, 0);

        assert_eq!(
            ensure_cancellable(BookingStatus::Confirmed, datetime(2024, 5, 10, 12, 0, 0, 0), now),
            Err(BookingError::TooLateToCancel)
        );
    }

    #[test]
    fn cancelling_four_hours_ahead_is_allowed() {
        let now = datetime(2024, 5, 10, 10, 0, 0, 0);

        assert_eq!(
            ensure_cancellable(BookingStatus::Confirmed, datetime(2024, 5, 10, 14, 0, 0, 0), now),
            Ok(())
        );
    }

    #[test]
    fn exactly_three_hours_ahead_is_allowed() {
        let now = datetime(2024, 5, 10, 10, 0, 0, 0);

        assert_eq!(
            ensure_cancellable(BookingStatus::Pending, datetime(2024, 5, 10, 13, 0, 0, 0), now),
            Ok(())
        );
    }

    #[test]
    fn past_bookings_are_too_late() {
        let now = datetime(2024, 5, 10, 10, 0, 0, 0);

        assert_eq!(
            ensure_cancellable(BookingStatus::Confirmed, datetime(2024, 5, 9, 10, 0, 0, 0), now),
            Err(BookingError::TooLateToCancel)
        );
    }

    #[test]
    fn finished_bookings_are_not_cancellable() {
        let now = datetime(2024, 5, 10, 10, 0, 0, 0);
        let later = datetime(2024, 6, 1, 10, 0, 0, 0);

        for status in [BookingStatus::Cancelled, BookingStatus::Completed] {
            assert_eq!(
                ensure_cancellable(status, later, now),
                Err(BookingError::NotCancellable(status))
            );
        }
    }

    #[test]
    fn payment_completes_confirmed_bookings_only() {
        assert_eq!(
            BookingStatus::Confirmed.after_payment(),
            BookingStatus::Completed
        );
        assert_eq!(BookingStatus::Pending.after_payment(), BookingStatus::Pending);
        assert_eq!(
            BookingStatus::Cancelled.after_payment(),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn booking_number_uses_date_and_uuid_tail() -> TestResult {
        let uuid = Uuid::parse_str("0190ab12-3456-7def-8abc-0123456789ab")?;

        assert_eq!(booking_number(uuid, date(2024, 7, 1)), "BK20240701456789AB");

        Ok(())
    }

    #[test]
    fn back_to_back_bookings_get_distinct_numbers() {
        let day = date(2024, 7, 1);

        let numbers: std::collections::HashSet<String> = (0..64)
            .map(|_| booking_number(Uuid::now_v7(), day))
            .collect();

        assert_eq!(numbers.len(), 64);
    }

    #[test]
    fn stats_count_billable_bookings() -> TestResult {
        let rates = horse_rates()?;
        let pro = price_booking(&rates, Subscription::active(Tier::Pro), 1)?;
        let free = price_booking(&rates, Subscription::free(), 2)?;

        let stats = BookingStats::collect(
            RUB,
            [
                (BookingStatus::Confirmed, &pro),
                (BookingStatus::Completed, &free),
                (BookingStatus::Cancelled, &free),
                (BookingStatus::Pending, &pro),
            ],
        )?;

        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.total_spent, rub(550_000));
        assert_eq!(stats.total_savings, rub(50_000));
        assert_eq!(stats.average_booking_value, rub(275_000));

        Ok(())
    }

    #[test]
    fn stats_without_bookings_are_zero() -> TestResult {
        let none: [(BookingStatus, &BookingPrice); 0] = [];

        let stats = BookingStats::collect(RUB, none)?;

        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.total_spent, rub(0));
        assert_eq!(stats.average_booking_value, rub(0));

        Ok(())
    }
}
