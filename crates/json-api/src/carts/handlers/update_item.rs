//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use paddock_app::domain::carts::records::QuantityUpdate;

use crate::{
    carts::{errors::into_api_error, responses::CartLineResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i64,
}

/// Update Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemUpdatedResponse {
    /// Line UUID
    pub uuid: Uuid,

    /// Whether the line was removed
    pub removed: bool,

    /// The updated line, absent when removed
    pub line: Option<CartLineResponse>,
}

/// Update Cart Item Handler
///
/// Overwrites the quantity without repricing the line.
#[endpoint(tags("cart"), summary = "Update Cart Item Quantity")]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> ApiResult<CartItemUpdatedResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let update = state
        .app
        .carts
        .update_quantity(
            customer.user,
            line.into_inner().into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_api_error)?;

    let (message, response) = match update {
        QuantityUpdate::Updated(line) => (
            "quantity updated",
            CartItemUpdatedResponse {
                uuid: line.uuid.into(),
                removed: false,
                line: Some(CartLineResponse::try_from(&line).or_500("failed to render cart line")?),
            },
        ),
        QuantityUpdate::Removed(uuid) => (
            "item removed from cart",
            CartItemUpdatedResponse {
                uuid: uuid.into(),
                removed: true,
                line: None,
            },
        ),
    };

    Ok(Envelope::ok(message, response))
}
