//! Booking schedule
//!
//! Dates and start times offered to riders. These are advisory: the booking
//! rules only require that a slot is free.

use jiff::{
    ToSpan,
    civil::{Date, Time, Weekday, time},
};

/// How many days ahead bookings are offered.
pub const BOOKING_HORIZON_DAYS: i32 = 30;

/// First bookable start hour.
pub const OPENING_HOUR: i8 = 9;

/// Last bookable start hour.
pub const LAST_START_HOUR: i8 = 19;

/// Weekdays from today through `horizon_days` days ahead, both inclusive.
pub fn bookable_dates(today: Date, horizon_days: i32) -> Vec<Date> {
    let days = usize::try_from(horizon_days).map_or(0, |days| days + 1);

    today
        .series(1.day())
        .take(days)
        .filter(|day| !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday))
        .collect()
}

/// Hourly start times from opening until the last start.
pub fn start_times() -> Vec<Time> {
    (OPENING_HOUR..=LAST_START_HOUR)
        .map(|hour| time(hour, 0, 0, 0))
        .collect()
}
