//! Bookings service errors.

use paddock::bookings::{BookingError, BookingStatus};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Partial unique index holding one live booking per horse and start.
const ACTIVE_SLOT_INDEX: &str = "bookings_active_slot_idx";

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("time slot is already booked")]
    SlotTaken,

    #[error("horse is not available for booking")]
    HorseUnavailable,

    #[error("bookings can only be cancelled at least 3 hours before they start")]
    TooLateToCancel,

    #[error("booking is {0} and cannot be cancelled")]
    NotCancellable(BookingStatus),

    #[error("duration must be at least 1 hour")]
    InvalidDuration,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("booking already exists")]
    AlreadyExists,

    #[error("no free booking number after {0} attempts")]
    BookingNumberExhausted(usize),

    #[error("booking or horse not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("booking could not be priced")]
    Pricing(#[source] BookingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<BookingError> for BookingsServiceError {
    fn from(error: BookingError) -> Self {
        match error {
            BookingError::InvalidDuration => Self::InvalidDuration,
            BookingError::TooLateToCancel => Self::TooLateToCancel,
            BookingError::NotCancellable(status) => Self::NotCancellable(status),
            BookingError::UnknownStatus(_) => Self::InvalidData,
            other @ BookingError::Amount(_) => Self::Pricing(other),
        }
    }
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::ColumnDecode { .. } => return Self::InvalidData,
            _ => {}
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::UniqueViolation
                if database_error.constraint() == Some(ACTIVE_SLOT_INDEX) =>
            {
                Self::SlotTaken
            }
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation => Self::MissingRequiredData,
            ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
