//! Booking Responses

use paddock::{
    bookings::{BookingPrice, BookingStats},
    money::AmountError,
};
use paddock_app::domain::bookings::records::BookingRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::MoneyResponse;

/// Booking Price Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingPriceResponse {
    /// Free tier hourly rate
    pub base_rate: MoneyResponse,

    /// Hourly rate for the caller's tier
    pub user_rate: MoneyResponse,

    /// Saving against the base rate, in percent
    pub discount_percent: String,

    pub duration_hours: u32,

    pub total: MoneyResponse,

    /// `base_rate × hours − total`
    pub savings: MoneyResponse,
}

impl TryFrom<&BookingPrice> for BookingPriceResponse {
    type Error = AmountError;

    fn try_from(price: &BookingPrice) -> Result<Self, Self::Error> {
        Ok(Self {
            base_rate: MoneyResponse::from(&price.base_rate),
            user_rate: MoneyResponse::from(&price.user_rate),
            discount_percent: price.discount_percent.normalize().to_string(),
            duration_hours: price.duration_hours,
            total: MoneyResponse::from(&price.total),
            savings: MoneyResponse::from(price.savings()?),
        })
    }
}

/// Booking Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    pub uuid: Uuid,

    /// `BK{YYYYMMDD}{XXXXXXXX}`
    pub booking_number: String,

    pub horse: Uuid,

    pub horse_name: String,

    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM`, business-local
    pub time: String,

    /// Rates frozen at booking time
    pub price: BookingPriceResponse,

    pub client_name: String,

    pub client_phone: String,

    pub comment: Option<String>,

    pub status: String,

    pub is_paid: bool,

    pub created_at: String,
}

impl TryFrom<BookingRecord> for BookingResponse {
    type Error = AmountError;

    fn try_from(booking: BookingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: booking.uuid.into(),
            booking_number: booking.booking_number,
            horse: booking.horse.into(),
            horse_name: booking.horse_name,
            date: booking.date.to_string(),
            time: booking.time.strftime("%H:%M").to_string(),
            price: BookingPriceResponse::try_from(&booking.price)?,
            client_name: booking.client_name,
            client_phone: booking.client_phone,
            comment: booking.comment,
            status: booking.status.as_str().to_string(),
            is_paid: booking.is_paid,
            created_at: booking.created_at.to_string(),
        })
    }
}

/// Booking Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingStatsResponse {
    pub total_bookings: u64,

    pub confirmed_bookings: u64,

    /// Over confirmed and completed bookings
    pub total_spent: MoneyResponse,

    pub total_savings: MoneyResponse,

    pub average_booking_value: MoneyResponse,
}

impl From<BookingStats> for BookingStatsResponse {
    fn from(stats: BookingStats) -> Self {
        Self {
            total_bookings: stats.total_bookings,
            confirmed_bookings: stats.confirmed_bookings,
            total_spent: MoneyResponse::from(&stats.total_spent),
            total_savings: MoneyResponse::from(&stats.total_savings),
            average_booking_value: MoneyResponse::from(&stats.average_booking_value),
        }
    }
}
