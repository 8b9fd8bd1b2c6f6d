//! Source error types.

use thiserror::Error;

/// Errors that can occur when fetching from a draw endpoint.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the endpoint asked us to wait.
        retry_after_secs: u64,
    },

    /// Response body was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),
}
