//! Booking Errors

use tracing::error;

use paddock_app::domain::bookings::BookingsServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: BookingsServiceError) -> ApiError {
    match error {
        BookingsServiceError::SlotTaken
        | BookingsServiceError::HorseUnavailable
        | BookingsServiceError::TooLateToCancel
        | BookingsServiceError::NotCancellable(_) => ApiError::conflict(error.to_string()),
        BookingsServiceError::InvalidDuration | BookingsServiceError::MissingField(_) => {
            ApiError::bad_request(error.to_string())
        }
        BookingsServiceError::NotFound => ApiError::not_found("booking or horse not found"),
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => ApiError::bad_request("invalid booking payload"),
        BookingsServiceError::AlreadyExists
        | BookingsServiceError::BookingNumberExhausted(_)
        | BookingsServiceError::Pricing(_)
        | BookingsServiceError::Sql(_) => {
            error!("booking request failed: {error}");

            ApiError::internal("booking failed")
        }
    }
}

/// Label for the bookings counter.
pub(crate) fn outcome(error: &BookingsServiceError) -> &'static str {
    match error {
        BookingsServiceError::SlotTaken => "slot_taken",
        BookingsServiceError::HorseUnavailable => "horse_unavailable",
        BookingsServiceError::InvalidDuration
        | BookingsServiceError::MissingField(_)
        | BookingsServiceError::NotFound => "invalid",
        _ => "failed",
    }
}

#[cfg(test)]
mod tests {
    use paddock::bookings::BookingStatus;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn rule_violations_are_conflicts_with_their_message() {
        let error = into_api_error(BookingsServiceError::TooLateToCancel);

        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(
            error.message(),
            "bookings can only be cancelled at least 3 hours before they start"
        );

        assert_eq!(
            into_api_error(BookingsServiceError::NotCancellable(BookingStatus::Completed))
                .message(),
            "booking is completed and cannot be cancelled"
        );
    }

    #[test]
    fn validation_failures_are_bad_requests() {
        assert_eq!(
            into_api_error(BookingsServiceError::MissingField("client_phone")).message(),
            "client_phone is required"
        );
        assert_eq!(
            into_api_error(BookingsServiceError::InvalidDuration).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
