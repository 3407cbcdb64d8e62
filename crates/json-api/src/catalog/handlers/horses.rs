//! Horses Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_api_error, responses::HorseResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HorsesResponse {
    pub horses: Vec<HorseResponse>,
}

/// Horses Handler
#[endpoint(tags("catalog"), summary = "List Horses")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<HorsesResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let horses = state
        .app
        .catalog
        .list_horses()
        .await
        .map_err(into_api_error)?
        .iter()
        .map(|horse| HorseResponse::new(horse, customer.subscription))
        .collect();

    Ok(Envelope::ok("horses loaded", HorsesResponse { horses }))
}

#[cfg(test)]
mod tests {
    use paddock::subscriptions::{Subscription, Tier};
    use paddock_app::domain::catalog::{
        CatalogServiceError,
        records::{HorseRecord, HorseUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        catalog::handlers::fixtures::prices,
        test_helpers::{Mocks, customer_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        customer_service(
            mocks,
            Subscription::active(Tier::Pro),
            Router::with_path("catalog/horses").get(handler),
        )
    }

    #[tokio::test]
    async fn pro_rate_is_shown() -> TestResult {
        let horse = HorseRecord {
            uuid: HorseUuid::new(),
            name: "Zarya".to_string(),
            breed: "Orlov Trotter".to_string(),
            rates: prices(2_000_00, 1_700_00, 1_500_00)?,
            is_active: true,
            is_available: false,
        };

        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_horses()
            .once()
            .return_once(move || Ok(vec![horse]));

        let mut res = TestClient::get("http://example.com/catalog/horses")
            .send(&make_service(mocks))
            .await;

        let body: Envelope<HorsesResponse> = res.take_json().await?;
        let horses = body.into_data()?.horses;

        assert_eq!(horses.len(), 1);
        assert_eq!(
            horses.first().map(|horse| (horse.available, horse.your_rate.minor_units)),
            Some((false, 1_500_00))
        );

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_horses()
            .once()
            .return_once(|| Err(CatalogServiceError::InvalidData));

        let res = TestClient::get("http://example.com/catalog/horses")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
