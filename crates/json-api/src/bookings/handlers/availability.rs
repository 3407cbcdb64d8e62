//! Slot Availability Handler

use std::sync::Arc;

use jiff::civil::{Date, Time};
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use paddock_app::domain::bookings::records::Availability;

use crate::{
    bookings::errors::into_api_error,
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    pub available: bool,

    /// Why the slot cannot be booked
    pub reason: Option<String>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        let reason = match availability {
            Availability::Available => None,
            Availability::HorseUnavailable => Some("horse is not available for booking"),
            Availability::SlotTaken => Some("time slot is already booked"),
        };

        Self {
            available: availability.is_available(),
            reason: reason.map(str::to_string),
        }
    }
}

/// Slot Availability Handler
///
/// Whether a horse can be booked at `date` (`YYYY-MM-DD`) and `time` (`HH:MM`).
#[endpoint(tags("bookings"), summary = "Check Slot Availability")]
pub(crate) async fn handler(
    horse: PathParam<Uuid>,
    date: QueryParam<String, true>,
    time: QueryParam<String, true>,
    depot: &mut Depot,
) -> ApiResult<AvailabilityResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let date = date.into_inner().parse::<Date>().or_400("date must be YYYY-MM-DD")?;
    let time = time.into_inner().parse::<Time>().or_400("time must be HH:MM")?;

    let availability = state
        .app
        .bookings
        .check_availability(horse.into_inner().into(), date, time)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::ok("availability checked", availability.into()))
}
