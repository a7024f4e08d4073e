//! Error types for the survey API.
//!
//! [`ApiError`] unifies all client-facing failure modes into a single enum
//! that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationErrors;

/// Errors that can occur in the survey API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A body or query parameter failed schema validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The request body was not readable as JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    /// No route matched the request.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MalformedBody(_) | Self::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) => serde_json::json!({
                "error": "request failed validation",
                "status": status.as_u16(),
                "fields": errors,
            }),
            Self::MalformedBody(msg) | Self::MalformedQuery(msg) | Self::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "status": status.as_u16(),
                })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
