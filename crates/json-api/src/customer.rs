//! Customer identification middleware.
//!
//! Resolves the `x-customer-uuid` header to a user and snapshots their
//! subscription once per request. Handlers read the snapshot from the depot
//! and pass it explicitly to every service call.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{Span, error};
use uuid::Uuid;

use paddock::subscriptions::Subscription;
use paddock_app::domain::profiles::records::UserUuid;

use crate::{envelope::ApiError, extensions::*, state::State};

pub(crate) const CUSTOMER_HEADER: &str = "x-customer-uuid";

/// The caller and their subscription as of the start of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CustomerContext {
    pub(crate) user: UserUuid,
    pub(crate) subscription: Subscription,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match identify(req, depot).await {
        Ok(customer) => {
            Span::current().record("customer", tracing::field::display(customer.user));
            Span::current().record("tier", customer.subscription.effective_tier().as_str());

            depot.insert_customer(customer);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn identify(req: &Request, depot: &Depot) -> Result<CustomerContext, ApiError> {
    let user = extract_customer_uuid(req)
        .ok_or_else(|| ApiError::unauthorized("missing or invalid x-customer-uuid header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subscription = state
        .app
        .profiles
        .get_subscription(user)
        .await
        .map_err(|source| {
            error!(%user, "failed to load subscription: {source}");

            ApiError::internal("could not load subscription")
        })?;

    Ok(CustomerContext { user, subscription })
}

fn extract_customer_uuid(req: &Request) -> Option<UserUuid> {
    let value = req.headers().get(CUSTOMER_HEADER)?.to_str().ok()?;

    Uuid::parse_str(value.trim()).ok().map(UserUuid::from_uuid)
}
