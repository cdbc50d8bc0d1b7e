//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": "..."}` JSON bodies with a matching
//! status code. Server-side failures log their detail and return a generic
//! message chosen by the route.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request body could not be read as expected (400)
    BadRequest { message: String },

    /// Store, filesystem or other server-side failure (500, logged)
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Build a `map_err` adapter that reports `message` to the client and
    /// keeps the source error for the log.
    ///
    /// ```ignore
    /// repo.list().await.map_err(ApiError::internal("Failed to fetch submissions"))?;
    /// ```
    pub fn internal<E: fmt::Display>(message: &'static str) -> impl FnOnce(E) -> Self {
        move |e| Self::Internal {
            message,
            detail: e.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { message } => message,
            Self::Internal { message, detail } => {
                // Log the actual error, return generic message
                tracing::error!(error = %detail, "{}", message);
                message.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
