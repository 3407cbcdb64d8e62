//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::{debug, error};

use crate::envelope::ApiError;

pub(crate) trait ResultExt<T> {
    /// Log the error and answer with a generic 500 envelope.
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    /// Answer with a 400 envelope carrying `message`.
    fn or_400(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::internal(context)
        })
    }

    fn or_400(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            debug!("{message}: {error}");

            ApiError::bad_request(message)
        })
    }
}
