//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use warden_core::error::{AppError, ErrorKind};
use warden_storage::ReadError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    /// The domain error.
    pub error: AppError,
    /// Extra structured context for the body.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status for an error kind.
    pub fn status_of(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Authentication | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::TraversalDetected => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            details: None,
        }
    }
}

impl From<ReadError> for ApiError {
    fn from(err: ReadError) -> Self {
        let details = match &err {
            ReadError::ValidationFailed(rule) => Some(serde_json::json!({ "rule": rule })),
            _ => None,
        };
        Self {
            error: err.into(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = Self::status_of(self.error.kind);

        let message = if self.error.is_client_facing() {
            self.error.message.clone()
        } else {
            tracing::error!(
                kind = %self.error.kind,
                error = %self.error.message,
                source = ?self.error.source,
                "Internal server error"
            );
            "Internal server error".to_string()
        };

        let body = ApiErrorResponse {
            error: if self.error.is_client_facing() {
                self.error.kind.to_string()
            } else {
                ErrorKind::Internal.to_string()
            },
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}
