//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    carts::errors::into_api_error,
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartClearedResponse {
    /// Lines removed
    pub removed: u64,
}

/// Clear Cart Handler
#[endpoint(tags("cart"), summary = "Clear Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<CartClearedResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let removed = state
        .app
        .carts
        .clear_cart(customer.user)
        .await
        .map_err(into_api_error)?;

    info!(user = %customer.user, removed, "cart cleared");

    Ok(Envelope::ok("cart cleared", CartClearedResponse { removed }))
}
