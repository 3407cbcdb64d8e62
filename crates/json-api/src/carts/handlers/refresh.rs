//! Refresh Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Refresh Cart Handler
///
/// Reprices every line at the caller's current tier price and returns the
/// updated cart.
#[endpoint(tags("cart"), summary = "Refresh Cart Prices")]
pub(crate) async fn handler(
    delivery_method: QueryParam<String, false>,
    depot: &mut Depot,
) -> ApiResult<CartResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let delivery_method = delivery_method.into_delivery_method()?;

    let view = state
        .app
        .carts
        .refresh_cart(customer.user, customer.subscription, delivery_method)
        .await
        .map_err(into_api_error)?;

    let cart = CartResponse::new(&view, customer.subscription).or_500("failed to render cart")?;

    Ok(Envelope::ok("cart prices refreshed", cart))
}

#[cfg(test)]
mod tests {
    use paddock::{
        delivery::DeliveryMethod,
        subscriptions::{Subscription, Tier},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        carts::handlers::fixtures::{make_line, make_view},
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    #[tokio::test]
    async fn refreshes_with_request_subscription() -> TestResult {
        let subscription = Subscription::active(Tier::Premium);
        let view = make_view(
            vec![make_line("Beet pulp", 3, 900_00)],
            subscription,
            DeliveryMethod::Post,
        )?;

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_refresh_cart()
            .once()
            .withf(move |user, sub, delivery| {
                *user == TEST_USER_UUID && *sub == subscription && *delivery == DeliveryMethod::Post
            })
            .return_once(move |_, _, _| Ok(view));

        let service = customer_service(
            mocks,
            subscription,
            Router::with_path("cart/refresh").post(handler),
        );

        let mut res = TestClient::post("http://example.com/cart/refresh?delivery_method=post")
            .send(&service)
            .await;

        let body: Envelope<CartResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "cart prices refreshed");
        assert_eq!(body.into_data()?.totals.subtotal.minor_units, 2_700_00);

        Ok(())
    }
}
