//! Response envelope
//!
//! Every JSON response, success or failure, has the shape
//! `{ "success": bool, "message": string, "data": T | null }`.

use salvo::{
    http::{StatusCode, StatusError},
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};

/// Uniform response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T> {
    /// Whether the request did what was asked
    pub success: bool,

    /// Human readable outcome
    pub message: String,

    /// Payload, absent on failure
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
        })
    }
}

#[cfg(test)]
#[derive(Debug, thiserror::Error)]
#[error("response has no data: {0}")]
pub(crate) struct MissingData(String);

#[cfg(test)]
impl<T> Envelope<T> {
    pub(crate) fn into_data(self) -> Result<T, MissingData> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(MissingData(self.message)),
        }
    }
}

pub(crate) type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// A failed request, rendered as an envelope with `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub(crate) fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(Envelope::<()> {
            success: false,
            message: self.message,
            data: None,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        <StatusError as EndpointOutRegister>::register(components, operation);
    }
}
