//! Error type shared by the services and the HTTP layer.
//!
//! # Design
//! Services return `ApiError` directly; `NotFound` is an ordinary return
//! value, not a crash. The `IntoResponse` impl renders every variant as
//! `{"statusCode", "message", "error"}` so clients see one error shape.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    /// No record of `resource` has this id.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: u64 },

    /// No route matches the method and path.
    #[error("Cannot {method} {path}")]
    NoRoute { method: String, path: String },

    /// The request was malformed or carried fields outside the declared shape.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::NoRoute { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
            "error": status.canonical_reason().unwrap_or("Error"),
        });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(rejection = %rejection.body_text(), "path parameter rejected");
        ApiError::Validation("Validation failed (numeric string is expected)".to_string())
    }
}
