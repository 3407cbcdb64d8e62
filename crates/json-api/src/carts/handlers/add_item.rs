//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use paddock_app::domain::carts::data::NewCartLine;

use crate::{
    carts::{errors::into_api_error, responses::CartLineResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Catalog item UUID
    pub item: Uuid,

    /// Quantity to add, at least 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<AddCartItemRequest> for NewCartLine {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartLine {
            item: request.item.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds an item at the caller's tier price. Adding an item already in the
/// cart increments the line and reprices all of it.
#[endpoint(
    tags("cart"),
    summary = "Add Item To Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown catalog item"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> ApiResult<CartLineResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let line = state
        .app
        .carts
        .add_item(customer.user, customer.subscription, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    let line = CartLineResponse::try_from(&line).or_500("failed to render cart line")?;

    res.status_code(StatusCode::CREATED);

    Ok(Envelope::ok(format!("{} added to cart", line.item_name), line))
}
