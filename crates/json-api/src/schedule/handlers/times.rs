//! Start Times Handler

use paddock::schedule::start_times;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::envelope::{ApiResult, Envelope};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StartTimesResponse {
    /// `HH:MM`
    pub times: Vec<String>,
}

/// Start Times Handler
#[endpoint(tags("schedule"), summary = "Bookable Start Times")]
pub(crate) async fn handler() -> ApiResult<StartTimesResponse> {
    let times = start_times()
        .into_iter()
        .map(|time| time.strftime("%H:%M").to_string())
        .collect();

    Ok(Envelope::ok("start times", StartTimesResponse { times }))
}
