//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use paddock_app::domain::orders::ORDER_HISTORY_LIMIT;

use crate::{
    envelope::{ApiResult, Envelope},
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Most recent orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order History Handler
///
/// Returns the caller's latest orders.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<OrdersResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(customer.user, ORDER_HISTORY_LIMIT)
        .await
        .map_err(|error| into_api_error(error, "failed to fetch orders"))?
        .into_iter()
        .map(OrderResponse::try_from)
        .collect::<Result<Vec<_>, _>>()
        .or_500("failed to render orders")?;

    Ok(Envelope::ok("orders loaded", OrdersResponse { orders }))
}
