//! Error types for the base station manager
//!
//! Each failure kind carries its own type tag and HTTP status so callers
//! can tell a Docker network failure from a persistence failure without
//! parsing message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the manager
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("The requested route was not found")]
    RouteNotFound,

    #[error("Network operation failed: {0}")]
    Network(String),

    #[error("Container operation failed: {0}")]
    Container(String),

    #[error("Attachment verification failed: {0}")]
    Verification(String),

    #[error("Failed to persist base station record: {0}")]
    Persistence(String),
}

impl ManagerError {
    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::RouteNotFound => "route_not_found",
            Self::Network(_) => "network_error",
            Self::Container(_) => "container_error",
            Self::Verification(_) => "verification_error",
            Self::Persistence(_) => "persistence_error",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Network(_) => StatusCode::BAD_GATEWAY,
            Self::Container(_) => StatusCode::BAD_GATEWAY,
            Self::Verification(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for ManagerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            message: self.to_string(),
            r#type: self.error_type().to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ManagerError {
    fn from(err: sqlx::Error) -> Self {
        ManagerError::Persistence(err.to_string())
    }
}

/// Result type alias for manager operations
pub type Result<T> = std::result::Result<T, ManagerError>;
