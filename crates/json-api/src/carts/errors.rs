//! Cart Errors

use tracing::error;

use paddock::cart::CartError;
use paddock_app::domain::carts::CartsServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => ApiError::not_found("cart line or item not found"),
        CartsServiceError::Cart(CartError::InvalidQuantity(quantity)) => {
            ApiError::bad_request(format!("quantity must be at least 1, got {quantity}"))
        }
        CartsServiceError::Cart(CartError::LineNotFound(_)) => {
            ApiError::not_found("cart line not found")
        }
        CartsServiceError::AlreadyExists => ApiError::conflict("cart line already exists"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => ApiError::bad_request("invalid cart payload"),
        CartsServiceError::Cart(source) => {
            error!("cart totals could not be computed: {source}");

            ApiError::unprocessable("cart totals could not be computed")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal("internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (CartsServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                CartsServiceError::Cart(CartError::InvalidQuantity(0)),
                StatusCode::BAD_REQUEST,
            ),
            (
                CartsServiceError::Cart(CartError::LineNotFound(Uuid::nil())),
                StatusCode::NOT_FOUND,
            ),
            (CartsServiceError::InvalidReference, StatusCode::BAD_REQUEST),
            (
                CartsServiceError::Cart(CartError::CurrencyMismatch(Uuid::nil(), "USD", "RUB")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(into_api_error(error).status(), status);
        }
    }
}
