//! Catalog Errors

use tracing::error;

use paddock_app::domain::catalog::CatalogServiceError;

use crate::envelope::ApiError;

pub(crate) fn into_api_error(error: CatalogServiceError) -> ApiError {
    match error {
        CatalogServiceError::NotFound => ApiError::not_found("catalog entry not found"),
        CatalogServiceError::InvalidData | CatalogServiceError::Sql(_) => {
            error!("catalog request failed: {error}");

            ApiError::internal("failed to load catalog")
        }
    }
}
