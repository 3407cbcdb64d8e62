//! Booking Records

use jiff::{
    Timestamp,
    civil::{Date, DateTime, Time},
};
use paddock::bookings::{BookingPrice, BookingStatus};

use crate::{
    domain::{catalog::records::HorseUuid, profiles::records::UserUuid},
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booking Record
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub booking_number: String,
    pub horse: HorseUuid,
    pub horse_name: String,
    pub user: UserUuid,
    pub date: Date,
    pub time: Time,
    /// Rates and total frozen at creation.
    pub price: BookingPrice,
    pub client_name: String,
    pub client_phone: String,
    pub comment: Option<String>,
    pub status: BookingStatus,
    pub is_paid: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BookingRecord {
    /// Scheduled start in business-local time.
    #[must_use]
    pub fn starts_at(&self) -> DateTime {
        self.date.to_datetime(self.time)
    }
}

/// Whether a slot can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    HorseUnavailable,
    SlotTaken,
}

impl Availability {
    #[must_use]
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}
