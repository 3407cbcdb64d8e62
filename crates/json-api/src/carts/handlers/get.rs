//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with totals for their subscription and the
/// requested delivery method (courier when omitted).
#[endpoint(tags("cart"), summary = "Get Cart")]
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
        .get_cart(customer.user, customer.subscription, delivery_method)
        .await
        .map_err(into_api_error)?;

    let cart = CartResponse::new(&view, customer.subscription).or_500("failed to render cart")?;

    Ok(Envelope::ok("cart loaded", cart))
}
