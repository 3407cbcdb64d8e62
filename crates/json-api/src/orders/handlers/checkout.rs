//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use paddock::{
    delivery::DeliveryMethod,
    orders::{ContactDetails, PaymentMethod},
};
use paddock_app::domain::orders::{OrdersServiceError, data::CheckoutRequest};

use crate::{
    envelope::{ApiError, ApiResult, Envelope},
    extensions::*,
    observability,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

/// Checkout Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CheckoutBody {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: Option<String>,
    pub postal_index: Option<String>,

    /// courier (default), pickup or post
    pub delivery_method: Option<String>,

    /// card (default), sbp, applepay, googlepay or cash
    pub payment_method: Option<String>,

    /// Stored on the order for reference; no discount is applied
    pub promo_code: Option<String>,

    pub notes: Option<String>,
}

impl TryFrom<CheckoutBody> for CheckoutRequest {
    type Error = ApiError;

    fn try_from(body: CheckoutBody) -> Result<Self, Self::Error> {
        let delivery_method = body
            .delivery_method
            .map(|value| value.parse::<DeliveryMethod>())
            .transpose()
            .or_400("delivery_method must be one of courier, pickup, post")?
            .unwrap_or_default();

        let payment_method = body
            .payment_method
            .map(|value| value.parse::<PaymentMethod>())
            .transpose()
            .or_400("payment_method must be one of card, sbp, applepay, googlepay, cash")?
            .unwrap_or_default();

        Ok(CheckoutRequest {
            contact: ContactDetails {
                name: body.name,
                phone: body.phone,
                email: body.email,
                city: body.city,
                street: body.street,
                house: body.house,
                apartment: body.apartment,
                postal_index: body.postal_index,
            },
            delivery_method,
            payment_method,
            promo_code: body.promo_code,
            notes: body.notes,
        })
    }
}

/// Checkout Handler
///
/// Settles the caller's cart into an order and empties the cart. Nothing is
/// written when settlement fails.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing contact field"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Settlement failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> ApiResult<OrderResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let request = CheckoutRequest::try_from(json.into_inner())?;

    let order = match state
        .app
        .orders
        .checkout(customer.user, customer.subscription, request)
        .await
    {
        Ok(order) => order,
        Err(error) => {
            observability::record_checkout(match &error {
                OrdersServiceError::EmptyCart => "empty_cart",
                OrdersServiceError::MissingField(_) => "invalid",
                _ => "failed",
            });

            return Err(into_api_error(error, "settlement failed"));
        }
    };

    observability::record_checkout("placed");

    let order = OrderResponse::try_from(order).or_500("failed to render order")?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::ok(
        format!("order {} placed", order.order_number),
        order,
    ))
}
