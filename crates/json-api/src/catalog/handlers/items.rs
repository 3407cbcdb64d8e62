//! Catalog Items Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_api_error, responses::CatalogItemResponse},
    envelope::{ApiResult, Envelope},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemsResponse {
    pub items: Vec<CatalogItemResponse>,
}

/// Catalog Items Handler
///
/// Every item with its tier prices and the price the caller pays today.
#[endpoint(tags("catalog"), summary = "List Catalog Items")]
pub(crate) async fn handler(depot: &mut Depot) -> ApiResult<CatalogItemsResponse> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let items = state
        .app
        .catalog
        .list_items()
        .await
        .map_err(into_api_error)?
        .iter()
        .map(|item| CatalogItemResponse::new(item, customer.subscription))
        .collect();

    Ok(Envelope::ok("catalog loaded", CatalogItemsResponse { items }))
}

#[cfg(test)]
mod tests {
    use paddock::subscriptions::{Subscription, Tier};
    use paddock_app::domain::catalog::records::{CatalogItemRecord, CatalogItemUuid, Unit};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        catalog::handlers::fixtures::prices,
        test_helpers::{Mocks, customer_service},
    };

    use super::*;

    #[tokio::test]
    async fn prices_follow_the_callers_tier() -> TestResult {
        let hay = CatalogItemRecord {
            uuid: CatalogItemUuid::new(),
            name: "Hay".to_string(),
            unit: Unit::Bag,
            prices: prices(1_000_00, 900_00, 800_00)?,
            stock: 12,
        };

        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_items()
            .once()
            .return_once(move || Ok(vec![hay]));

        let service = customer_service(
            mocks,
            Subscription::active(Tier::Premium),
            Router::with_path("catalog/items").get(handler),
        );

        let mut res = TestClient::get("http://example.com/catalog/items")
            .send(&service)
            .await;

        let body: Envelope<CatalogItemsResponse> = res.take_json().await?;
        let items = body.into_data()?.items;

        assert_eq!(
            items.first().map(|item| (
                item.unit.as_str(),
                item.prices.base.minor_units,
                item.your_price.minor_units
            )),
            Some(("bag", 1_000_00, 900_00))
        );

        Ok(())
    }

    #[tokio::test]
    async fn lapsed_subscription_pays_base() -> TestResult {
        let oats = CatalogItemRecord {
            uuid: CatalogItemUuid::new(),
            name: "Oats".to_string(),
            unit: Unit::Kg,
            prices: prices(100_00, 90_00, 80_00)?,
            stock: 0,
        };

        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_items()
            .once()
            .return_once(move || Ok(vec![oats]));

        let service = customer_service(
            mocks,
            Subscription::new(Tier::Pro, false),
            Router::with_path("catalog/items").get(handler),
        );

        let mut res = TestClient::get("http://example.com/catalog/items")
            .send(&service)
            .await;

        let body: Envelope<CatalogItemsResponse> = res.take_json().await?;
        let items = body.into_data()?.items;

        assert_eq!(
            items.first().map(|item| item.your_price.minor_units),
            Some(100_00)
        );

        Ok(())
    }
}
