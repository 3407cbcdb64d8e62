//! Cancel Booking Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_api_error, responses::BookingResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    observability,
    state::State,
};

/// Cancel Booking Handler
///
/// Cancels one of the caller's bookings, at least three hours before it starts.
#[endpoint(tags("bookings"), summary = "Cancel Booking")]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> ApiResult<BookingResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let booking = state
        .app
        .bookings
        .cancel_booking(customer.user, booking.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_api_error)?;

    observability::record_booking("cancelled");

    let booking = BookingResponse::try_from(booking).or_500("failed to render booking")?;

    Ok(Envelope::ok(
        format!("booking {} cancelled", booking.booking_number),
        booking,
    ))
}

#[cfg(test)]
mod tests {
    use paddock::{bookings::BookingStatus, subscriptions::Subscription};
    use paddock_app::domain::{
        bookings::{BookingsServiceError, records::BookingUuid},
        catalog::records::HorseUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        bookings::handlers::fixtures::make_booking,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        customer_service(
            mocks,
            Subscription::free(),
            Router::with_path("bookings/{booking}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn cancels_own_booking() -> TestResult {
        let mut booking = make_booking(HorseUuid::new())?;
        booking.status = BookingStatus::Cancelled;
        let uuid = booking.uuid;

        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_cancel_booking()
            .once()
            .withf(move |user, b, _| *user == TEST_USER_UUID && *b == uuid)
            .return_once(move |_, _, _| Ok(booking));

        let mut res = TestClient::post(format!("http://example.com/bookings/{uuid}/cancel"))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<BookingResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.into_data()?.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn short_notice_returns_409() -> TestResult {
        let uuid = BookingUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_cancel_booking()
            .once()
            .return_once(|_, _, _| Err(BookingsServiceError::TooLateToCancel));

        let mut res = TestClient::post(format!("http://example.com/bookings/{uuid}/cancel"))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<serde_json::Value> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(
            body.message,
            "bookings can only be cancelled at least 3 hours before they start"
        );

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_booking_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_cancel_booking()
            .once()
            .return_once(|_, _, _| Err(BookingsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/bookings/{}/cancel",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
