/*!
 * Error types for the docproof application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
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

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a retry can reasonably be expected to succeed.
    ///
    /// Connection problems, rate limits and server-side errors are transient;
    /// authentication failures, client-side rejections and unparseable
    /// responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::RequestFailed(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Terminal outcome of a single check after the retry policy has run its course
#[derive(Error, Debug)]
pub enum CheckError {
    /// All retry attempts were consumed without a successful response
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        /// Total number of attempts made (initial call plus retries)
        attempts: u32,
        /// The error from the final attempt
        last_error: ProviderError,
    },

    /// The provider rejected the call in a way retrying cannot fix
    #[error("non-retryable provider error: {0}")]
    NonRetryable(ProviderError),

    /// Cancellation arrived between attempts before the retry budget ran out
    #[error("cancelled after {attempts} attempts: {last_error}")]
    Cancelled {
        /// Number of attempts made before cancellation was observed
        attempts: u32,
        /// The error from the last attempt
        last_error: ProviderError,
    },
}

impl CheckError {
    /// Short classification label used in failure markers and progress events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExhaustedRetries { .. } => "retries exhausted",
            Self::NonRetryable(_) => "rejected",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document contained no usable paragraphs
    #[error("Document error: {0}")]
    Document(String),

    /// The provider could not be reached or authenticated at startup
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),

    /// Error from a provider after the run has started
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
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
