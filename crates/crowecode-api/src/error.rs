//! API errors and their branded JSON rendering.
//!
//! Every failure leaves the service as `{"error": "<fixed message>"}` with
//! a status code. Upstream detail is logged here and nowhere else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crowecode_core::types::RequestMode;
use crowecode_providers::ServiceError;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "CroweCode Intelligence is not configured. Please contact support.";
pub const CHAT_UNAVAILABLE_MESSAGE: &str =
    "CroweCode Intelligence is experiencing high demand. Please try again.";
pub const ANALYSIS_UNAVAILABLE_MESSAGE: &str = "CroweCode Intelligence temporarily unavailable";
pub const INTERNAL_MESSAGE: &str =
    "CroweCode Intelligence service error. Our team has been notified.";
pub const BAD_REQUEST_MESSAGE: &str = "Invalid request body";
pub const UNAUTHORIZED_MESSAGE: &str = "CroweCode Intelligence operator access required.";

/// JSON body of every error response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no provider configured")]
    NotConfigured,
    #[error("upstream unavailable during {0:?} request")]
    Unavailable(RequestMode),
    #[error("internal error")]
    Internal,
    #[error("bad request")]
    BadRequest,
    #[error("missing or invalid operator token")]
    Unauthorized,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// The only text a caller ever sees.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            ApiError::Unavailable(RequestMode::Chat) => CHAT_UNAVAILABLE_MESSAGE,
            ApiError::Unavailable(RequestMode::Analyze) => ANALYSIS_UNAVAILABLE_MESSAGE,
            ApiError::Internal => INTERNAL_MESSAGE,
            ApiError::BadRequest => BAD_REQUEST_MESSAGE,
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotConfigured { .. } => ApiError::NotConfigured,
            ServiceError::InvalidRequest { .. } => ApiError::Internal,
            ServiceError::Provider { mode, source } => {
                error!(
                    ?mode,
                    status = source.upstream_status(),
                    error = %source,
                    "provider call failed"
                );
                if source.is_upstream_failure() {
                    ApiError::Unavailable(mode)
                } else {
                    ApiError::Internal
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
