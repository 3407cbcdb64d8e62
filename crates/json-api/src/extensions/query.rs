//! Delivery method query parsing.

use paddock::delivery::DeliveryMethod;
use salvo::oapi::extract::QueryParam;

use crate::{envelope::ApiError, extensions::*};

pub(crate) trait DeliveryQueryExt {
    /// The `delivery_method` query parameter, courier when absent.
    fn into_delivery_method(self) -> Result<DeliveryMethod, ApiError>;
}

impl DeliveryQueryExt for QueryParam<String, false> {
    fn into_delivery_method(self) -> Result<DeliveryMethod, ApiError> {
        self.into_inner()
            .map(|value| value.parse::<DeliveryMethod>())
            .transpose()
            .or_400("delivery_method must be one of courier, pickup, post")
            .map(Option::unwrap_or_default)
    }
}
