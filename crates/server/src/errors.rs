use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const DUPLICATE_DESCRIPTION: &str = "An incomplete item with the same description already exists.";
pub const ID_MISMATCH: &str = "ID mismatch";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Transport-level failure: a status and an optional plain-text body.
/// Bodies are fixed strings; internal error details are logged, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<&'static str>,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message: Some(message) }
    }

    /// Status only, empty body.
    pub const fn bare(status: StatusCode) -> Self {
        Self { status, message: None }
    }

    pub const fn bad_request(message: &'static str) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }
    pub const fn conflict(message: &'static str) -> Self { Self::new(StatusCode::CONFLICT, message) }
    pub const fn not_found() -> Self { Self::bare(StatusCode::NOT_FOUND) }
    pub const fn internal() -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.message {
            Some(msg) => (self.status, msg).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
