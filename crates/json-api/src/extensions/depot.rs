//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use crate::{customer::CustomerContext, envelope::ApiError};

const CUSTOMER_DEPOT_KEY: &str = "customer";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_customer(&mut self, customer: CustomerContext);

    fn customer_or_401(&self) -> Result<CustomerContext, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal("internal server error"))
    }

    fn insert_customer(&mut self, customer: CustomerContext) {
        self.insert(CUSTOMER_DEPOT_KEY, customer);
    }

    fn customer_or_401(&self) -> Result<CustomerContext, ApiError> {
        self.get::<CustomerContext>(CUSTOMER_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("customer not identified"))
    }
}
