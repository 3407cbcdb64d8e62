//! Cart Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::errors::into_api_error,
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCountResponse {
    /// Number of distinct lines
    pub count: u64,
}

/// Cart Count Handler
#[endpoint(tags("cart"), summary = "Count Cart Items")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<CartCountResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let count = state
        .app
        .carts
        .count_items(customer.user)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::ok("cart counted", CartCountResponse { count }))
}
