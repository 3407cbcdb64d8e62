//! Bookable Dates Handler

use std::sync::Arc;

use jiff::Timestamp;
use paddock::schedule::{BOOKING_HORIZON_DAYS, bookable_dates};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookableDatesResponse {
    /// `YYYY-MM-DD`, weekdays from today in the business time zone
    pub dates: Vec<String>,
}

/// Bookable Dates Handler
#[endpoint(tags("schedule"), summary = "Bookable Dates")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<BookableDatesResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let today = state.app.storefront.local_date(Timestamp::now());

    let dates = bookable_dates(today, BOOKING_HORIZON_DAYS)
        .into_iter()
        .map(|date| date.to_string())
        .collect();

    Ok(Envelope::ok("bookable dates", BookableDatesResponse { dates }))
}
