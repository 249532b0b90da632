//! API error type with IntoResponse
//!
//! Errors are converted to `{"success": false, "error": ...}` with a matching
//! status code. Internal detail is logged, never returned.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::usecases::{ErrorKind, UseCaseError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Bad input (400)
    Validation(String),

    /// Identifier not in the active store (404)
    NotFound(String),

    /// Anything else (500, logged)
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(message) | Self::NotFound(message) => message,
            Self::Internal(detail) => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e.kind {
            ErrorKind::Validation => Self::Validation(e.message),
            ErrorKind::NotFound => Self::NotFound(e.message),
            ErrorKind::Unexpected => Self::Internal(e.message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Validation(e.body_text())
    }
}
