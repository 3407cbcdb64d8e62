//! Evaluate Promo Code Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use paddock::{
    delivery::DeliveryMethod,
    money,
    promotions::{PromoDiscount, PromoError},
};

use crate::{
    carts::errors::into_api_error,
    envelope::{ApiError, ApiResult, Envelope},
    extensions::*,
    money::MoneyResponse,
    state::State,
};

/// Evaluate Promo Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EvaluatePromoRequest {
    pub code: String,
}

/// Promo Code Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoResponse {
    /// Normalised code
    pub code: String,

    /// `percentage` or `amount`
    pub kind: String,

    /// Percent off (e.g. `"10"`) or decimal amount off
    pub value: String,

    /// Current cart subtotal
    pub subtotal: MoneyResponse,

    /// What the code would take off the subtotal
    pub preview_discount: MoneyResponse,
}

/// Evaluate Promo Code Handler
///
/// Looks a code up and previews it against the caller's cart subtotal.
/// Evaluation is informational: checkout never applies the discount.
#[endpoint(tags("promotions"), summary = "Evaluate Promo Code")]
pub(crate) async fn handler(
    json: JsonBody<EvaluatePromoRequest>,
    depot: &mut Depot,
) -> ApiResult<PromoResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let request = json.into_inner();

    let descriptor = state
        .app
        .storefront
        .promotions()
        .evaluate(&request.code)
        .map_err(|error| match error {
            PromoError::NotFound(_) => ApiError::not_found("promo code not found"),
            other => ApiError::internal(other.to_string()),
        })?;

    let cart = state
        .app
        .carts
        .get_cart(customer.user, customer.subscription, DeliveryMethod::default())
        .await
        .map_err(into_api_error)?;

    let subtotal = cart.breakdown.subtotal;
    let preview = descriptor
        .preview(&subtotal)
        .or_500("failed to preview promo code")?;

    let (kind, value) = match descriptor.discount() {
        PromoDiscount::PercentageOff(percent) => (
            "percentage",
            money::percent_points(&percent).normalize().to_string(),
        ),
        PromoDiscount::AmountOff(amount) => ("amount", amount.amount().to_string()),
    };

    Ok(Envelope::ok(
        format!("promo code {} is valid", descriptor.code()),
        PromoResponse {
            code: descriptor.code().to_string(),
            kind: kind.to_string(),
            value,
            subtotal: MoneyResponse::from(&subtotal),
            preview_discount: MoneyResponse::from(preview),
        },
    ))
}
