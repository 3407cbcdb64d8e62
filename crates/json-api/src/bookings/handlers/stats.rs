//! Booking Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    bookings::{errors::into_api_error, responses::BookingStatsResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Booking Stats Handler
///
/// Totals over the caller's bookings. Spending and savings count confirmed
/// and completed bookings only.
#[endpoint(tags("bookings"), summary = "Booking Statistics")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<BookingStatsResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let stats = state
        .app
        .bookings
        .booking_stats(customer.user)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::ok("booking statistics", stats.into()))
}

#[cfg(test)]
mod tests {
    use paddock::{bookings::BookingStats, subscriptions::Subscription};
    use rusty_money::{Money, iso::RUB};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, customer_service};

    use super::*;

    #[tokio::test]
    async fn renders_totals() -> TestResult {
        let stats = BookingStats {
            total_bookings: 3,
            confirmed_bookings: 1,
            total_spent: Money::from_minor(6_000_00, RUB),
            total_savings: Money::from_minor(2_000_00, RUB),
            average_booking_value: Money::from_minor(3_000_00, RUB),
        };

        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_booking_stats()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(stats));

        let service = customer_service(
            mocks,
            Subscription::free(),
            Router::with_path("bookings/stats").get(handler),
        );

        let mut res = TestClient::get("http://example.com/bookings/stats")
            .send(&service)
            .await;

        let body: Envelope<BookingStatsResponse> = res.take_json().await?;
        let stats = body.into_data()?;

        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.average_booking_value.minor_units, 3_000_00);

        Ok(())
    }
}
