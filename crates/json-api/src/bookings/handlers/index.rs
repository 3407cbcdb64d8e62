//! Booking List Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    bookings::{errors::into_api_error, responses::BookingResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsResponse {
    /// Latest start first
    pub bookings: Vec<BookingResponse>,
}

/// Booking List Handler
#[endpoint(tags("bookings"), summary = "List Bookings")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<BookingsResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let bookings = state
        .app
        .bookings
        .list_bookings(customer.user)
        .await
        .map_err(into_api_error)?
        .into_iter()
        .map(BookingResponse::try_from)
        .collect::<Result<Vec<_>, _>>()
        .or_500("failed to render bookings")?;

    Ok(Envelope::ok("bookings loaded", BookingsResponse { bookings }))
}
