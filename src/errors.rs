/*!
 * Error types for the parlance application.
 *
 * Provider failures are recovered inside a pipeline run and never reach the
 * caller of the pipeline. Request errors reject a request before it starts.
 * `AppError` is what configuration validation reports.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider did not answer in time
    #[error("Provider timed out after {0:?}")]
    Timeout(Duration),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// No provider is registered under this name
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Reasons a translation request is rejected before the pipeline starts
#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    /// Source text missing or blank
    #[error("Source text must not be empty")]
    EmptySourceText,

    /// Session identifier missing or blank
    #[error("Session id must not be empty")]
    EmptySessionId,

    /// Language code not recognized
    #[error("Invalid {field} language code: '{code}'")]
    InvalidLanguage {
        /// Which request field carried the code
        field: &'static str,
        /// The offending code
        code: String,
    },

    /// Batch holds more texts than allowed
    #[error("Batch size {size} exceeds maximum limit of {limit} texts")]
    BatchTooLarge {
        /// Number of texts submitted
        size: usize,
        /// Configured limit
        limit: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Rejected request
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
