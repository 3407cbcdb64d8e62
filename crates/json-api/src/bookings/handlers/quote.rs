//! Booking Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_api_error, responses::BookingPriceResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

/// Booking Quote Handler
///
/// Prices `hours` of riding on a horse for the caller's subscription.
#[endpoint(tags("bookings"), summary = "Quote Booking Price")]
pub(crate) async fn handler(
    horse: PathParam<Uuid>,
    hours: QueryParam<u32, false>,
    depot: &mut Depot,
) -> ApiResult<BookingPriceResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let price = state
        .app
        .bookings
        .quote(
            horse.into_inner().into(),
            customer.subscription,
            hours.into_inner().unwrap_or(1),
        )
        .await
        .map_err(into_api_error)?;

    let price = BookingPriceResponse::try_from(&price).or_500("failed to render quote")?;

    Ok(Envelope::ok("booking priced", price))
}
