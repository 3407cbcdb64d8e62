//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiResult, Envelope},
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns one of the caller's orders with its lines.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(order: PathParam<Uuid>, depot: &mut Depot) -> ApiResult<OrderResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let order = state
        .app
        .orders
        .get_order(customer.user, order.into_inner().into())
        .await
        .map_err(|error| into_api_error(error, "failed to fetch order"))?;

    let order = OrderResponse::try_from(order).or_500("failed to render order")?;

    Ok(Envelope::ok("order loaded", order))
}

#[cfg(test)]
mod tests {
    use paddock::subscriptions::Subscription;
    use paddock_app::domain::orders::{OrdersServiceError, records::OrderUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::handlers::fixtures::make_order,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        customer_service(
            mocks,
            Subscription::free(),
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_order_with_line_totals() -> TestResult {
        let order = make_order("AKZ-20240309-00A1F3");
        let uuid = order.uuid;

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;
        let order = body.into_data()?;
        let line_totals: Vec<i64> = order
            .lines
            .iter()
            .map(|line| line.total.minor_units)
            .collect();

        assert_eq!(order.uuid, uuid.into_uuid());
        assert_eq!(line_totals, [20_000_00, 5_400_00]);

        Ok(())
    }

    #[tokio::test]
    async fn another_users_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
