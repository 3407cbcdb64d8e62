//! Booking Data

use jiff::civil::{Date, Time};

use crate::domain::catalog::records::HorseUuid;

/// A booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub horse: HorseUuid,
    pub date: Date,
    pub time: Time,
    pub duration_hours: u32,
    pub client_name: String,
    pub client_phone: String,
    pub comment: Option<String>,
}
