//! Error types for moodtunes
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Each variant that reaches an API handler maps to a fixed
//! HTTP status and a structured JSON body via [`IntoResponse`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for moodtunes
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected input: missing mood, unknown language or mood label,
    /// out-of-range index
    #[error("Validation failure: {0}")]
    Validation(String),

    /// Operation not valid in the current phase or mode
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Emotion detection call failed (network, HTTP status, or decode)
    #[error("Detection failure: {0}")]
    Detection(String),

    /// Playlist retrieval call failed (network, HTTP status, decode, or
    /// empty result)
    #[error("Playlist fetch failure: {0}")]
    PlaylistFetch(String),

    /// Camera unavailable: permission denied, no device, or no active stream
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using moodtunes Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code, shared by the HTTP error body and
    /// `SessionError` events.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_FAILURE",
            Error::InvalidState(_) => "INVALID_STATE",
            Error::Detection(_) => "DETECTION_FAILURE",
            Error::PlaylistFetch(_) => "PLAYLIST_FETCH_FAILURE",
            Error::ResourceUnavailable(_) => "RESOURCE_UNAVAILABLE",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Http(_) => "HTTP_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the error maps to at the API boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::InvalidState(_) => StatusCode::CONFLICT,
            Error::Detection(_) | Error::PlaylistFetch(_) => StatusCode::BAD_GATEWAY,
            Error::ResourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Http(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
