//! Order Errors

use tracing::error;

use paddock_app::domain::orders::OrdersServiceError;

use crate::envelope::ApiError;

/// Map a service error, answering unexpected faults with `failure`.
pub(crate) fn into_api_error(error: OrdersServiceError, failure: &str) -> ApiError {
    match error {
        OrdersServiceError::EmptyCart => ApiError::bad_request("cart is empty"),
        OrdersServiceError::MissingField(field) => {
            ApiError::bad_request(format!("{field} is required"))
        }
        OrdersServiceError::NotFound => ApiError::not_found("order not found"),
        OrdersServiceError::InvalidTransition { from, to } => {
            ApiError::conflict(format!("cannot move order from {from} to {to}"))
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::bad_request("invalid order payload"),
        OrdersServiceError::AlreadyExists
        | OrdersServiceError::OrderNumberExhausted
        | OrdersServiceError::Settlement(_)
        | OrdersServiceError::Sql(_) => {
            error!("{failure}: {error}");

            ApiError::internal(failure)
        }
    }
}
