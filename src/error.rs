//! Unified error types for the utility lookup service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::api::response::ErrorResponse;

/// Process-level error type (startup, configuration, CLI commands).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request lookup error surfaced outside of the HTTP layer.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Metrics exporter installation error.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the external ZIP-to-place geocoder.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// The geocoder answered with a non-success status for this ZIP.
    #[error("zip {zip} not found")]
    NotFound {
        /// The ZIP that missed.
        zip: String,
    },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("geocode request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoder answered 2xx with a body we could not decode.
    #[error("failed to parse geocode response: {0}")]
    Parse(String),
}

/// Request-level lookup errors. Each one is terminal for the request.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Input was missing or not a 5-digit string.
    #[error("invalid zip")]
    InvalidZip,

    /// The geocoder has no place for this ZIP.
    #[error("zip {0} not found")]
    ZipNotFound(String),

    /// Anything else went wrong talking to the geocoder.
    #[error("geocode failed: {0}")]
    Geocode(GeocodeError),
}

impl From<GeocodeError> for LookupError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound { zip } => LookupError::ZipNotFound(zip),
            other => LookupError::Geocode(other),
        }
    }
}

impl LookupError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::InvalidZip => StatusCode::BAD_REQUEST,
            LookupError::ZipNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Geocode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing error string.
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::InvalidZip => "Invalid ZIP",
            LookupError::ZipNotFound(_) => "ZIP not found",
            LookupError::Geocode(_) => "lookup_failed",
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidZip => "invalid_zip",
            LookupError::ZipNotFound(_) => "zip_not_found",
            LookupError::Geocode(_) => "lookup_failed",
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "lookup error");
        }

        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
