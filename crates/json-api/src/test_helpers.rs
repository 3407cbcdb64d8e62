//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use paddock::subscriptions::Subscription;
use paddock_app::{
    context::AppContext,
    domain::{
        bookings::MockBookingsService, carts::MockCartsService, catalog::MockCatalogService,
        orders::MockOrdersService, profiles::MockProfilesService,
        profiles::records::UserUuid,
    },
    storefront::Storefront,
};

use crate::{customer::CustomerContext, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// One mock per service; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) profiles: MockProfilesService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) bookings: MockBookingsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            storefront: Storefront::default(),
            profiles: Arc::new(self.profiles),
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            bookings: Arc::new(self.bookings),
        })
    }
}

pub(crate) fn state_with_profiles(profiles: MockProfilesService) -> Arc<State> {
    Mocks {
        profiles,
        ..Mocks::default()
    }
    .into_state()
}

/// Puts a fixed customer in the depot in place of the header middleware.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectCustomer(pub(crate) CustomerContext);

#[salvo::handler]
impl InjectCustomer {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_customer(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Service with the mocks injected and `TEST_USER_UUID` on `subscription`.
pub(crate) fn customer_service(mocks: Mocks, subscription: Subscription, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectCustomer(CustomerContext {
                user: TEST_USER_UUID,
                subscription,
            }))
            .push(route),
    )
}

/// Service with the mocks injected and no customer.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}
