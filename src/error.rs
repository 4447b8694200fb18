//! Error types for quiet-hn
//!
//! This module provides error handling for the library, including:
//! - The crate-wide [`Error`] enum and [`Result`] alias
//! - HTTP status code mapping for the web server
//! - Structured JSON error responses with machine-readable error codes
//!
//! Failures of single item fetches never show up here. The aggregator folds
//! them into [`crate::types::DiscardReason`]; only running out of ids before
//! enough stories were found reaches the caller, as
//! [`Error::InsufficientResults`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::ParsedItem;
use crate::types::ItemId;

/// Result type alias for quiet-hn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quiet-hn
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "client.api_base")
        key: Option<String>,
    },

    /// The ranked ids ran out before enough valid stories were found.
    ///
    /// `items` holds every valid story that was found, in rank order, so
    /// callers can still show a shorter page.
    #[error("insufficient results: found {} of {requested} stories", items.len())]
    InsufficientResults {
        /// Number of stories requested
        requested: usize,
        /// Valid stories found, in rank order
        items: Vec<ParsedItem>,
    },

    /// The API returned `null` for an item (deleted or never existed)
    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    /// The API answered with a non-success status
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error on a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// The partial story list carried by [`Error::InsufficientResults`]
    pub fn partial_items(&self) -> Option<&[ParsedItem]> {
        match self {
            Error::InsufficientResults { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Consume the error, returning the partial story list if it carries one
    pub fn into_partial_items(self) -> Option<Vec<ParsedItem>> {
        match self {
            Error::InsufficientResults { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "insufficient_results",
///     "message": "insufficient results: found 12 of 30 stories",
///     "details": {
///       "requested": 30,
///       "found": 12
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "upstream_error", "config_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::Config { .. } => 400,

            // 404 Not Found
            Error::ItemNotFound(_) => 404,

            // 500 Internal Server Error
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,

            // 502 Bad Gateway - the Hacker News API misbehaved
            Error::UpstreamStatus { .. } => 502,
            Error::Network(_) => 502,
            Error::Serialization(_) => 502,

            // 503 Service Unavailable - not enough stories right now
            Error::InsufficientResults { .. } => 503,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InsufficientResults { .. } => "insufficient_results",
            Error::ItemNotFound(_) => "item_not_found",
            Error::UpstreamStatus { .. } => "upstream_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::InsufficientResults { requested, items } => Some(serde_json::json!({
                "requested": requested,
                "found": items.len(),
            })),
            Error::ItemNotFound(id) => Some(serde_json::json!({
                "item_id": id,
            })),
            Error::UpstreamStatus { status, url } => Some(serde_json::json!({
                "status": status,
                "url": url,
            })),
            _ => None,
        };

        match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        }
    }
}
