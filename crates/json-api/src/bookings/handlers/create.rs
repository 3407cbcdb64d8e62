//! Create Booking Handler

use std::sync::Arc;

use jiff::civil::{Date, Time};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use paddock_app::domain::bookings::data::NewBooking;

use crate::{
    bookings::{
        errors::{into_api_error, outcome},
        responses::BookingResponse,
    },
    envelope::{ApiError, ApiResult, Envelope},
    extensions::*,
    observability,
    state::State,
};

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    pub horse: Uuid,

    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM`
    pub time: String,

    #[serde(default = "default_duration")]
    pub duration_hours: u32,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_phone: String,

    pub comment: Option<String>,
}

fn default_duration() -> u32 {
    1
}

impl TryFrom<CreateBookingRequest> for NewBooking {
    type Error = ApiError;

    fn try_from(request: CreateBookingRequest) -> Result<Self, Self::Error> {
        Ok(NewBooking {
            horse: request.horse.into(),
            date: request.date.parse::<Date>().or_400("date must be YYYY-MM-DD")?,
            time: request.time.parse::<Time>().or_400("time must be HH:MM")?,
            duration_hours: request.duration_hours,
            client_name: request.client_name,
            client_phone: request.client_phone,
            comment: request.comment,
        })
    }
}

/// Create Booking Handler
///
/// Books a horse at the caller's tier rate. The booking is confirmed
/// immediately and its price is frozen.
#[endpoint(
    tags("bookings"),
    summary = "Book A Horse",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking confirmed"),
        (status_code = StatusCode::CONFLICT, description = "Slot taken or horse unavailable"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> ApiResult<BookingResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let booking = NewBooking::try_from(json.into_inner())?;

    let booking = match state
        .app
        .bookings
        .create_booking(customer.user, customer.subscription, booking)
        .await
    {
        Ok(booking) => booking,
        Err(error) => {
            observability::record_booking(outcome(&error));

            return Err(into_api_error(error));
        }
    };

    observability::record_booking("created");

    let booking = BookingResponse::try_from(booking).or_500("failed to render booking")?;

    res.add_header(LOCATION, format!("/bookings/{}", booking.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::ok(
        format!("booking {} confirmed", booking.booking_number),
        booking,
    ))
}
