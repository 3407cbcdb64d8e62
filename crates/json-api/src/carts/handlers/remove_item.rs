//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::errors::into_api_error,
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(tags("cart"), summary = "Remove Cart Item")]
pub(crate) async fn handler(line: PathParam<Uuid>, depot: &mut Depot) -> ApiResult<Uuid> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let line = line.into_inner();

    state
        .app
        .carts
        .remove_item(customer.user, line.into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::ok("item removed from cart", line))
}
