//! Error types for the REST collaborator.

use thiserror::Error;

/// Failures of the device API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code returned.
        status: reqwest::StatusCode,
        /// The request URL, for log context.
        url: String,
    },

    /// A response body did not decode into the expected shape.
    #[error("failed to decode response from {url}: {reason}")]
    Decode {
        /// The request URL, for log context.
        url: String,
        /// Underlying decode failure.
        reason: String,
    },

    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
