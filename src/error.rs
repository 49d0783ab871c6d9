//! Error types for the contact pruner.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the People API.
#[derive(Error, Debug)]
pub enum PeopleApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Could not reach the API host at all
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Token lacks permission for the operation
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Server reported a transient failure
    #[error("Service unavailable (status {0})")]
    ServiceUnavailable(u16),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while assembling the input contact set.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No contact group carries the requested label
    #[error("No label found for name {0}")]
    LabelNotFound(String),

    /// Remote call failed after retries
    #[error(transparent)]
    Api(#[from] PeopleApiError),

    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a JSON array of person records
    #[error("Invalid contact data in {path}: {source}")]
    InvalidInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The same resource name appears twice in the input
    #[error("Duplicate resource name in input: {0}")]
    DuplicateResourceName(String),
}

/// Convenience type alias for Results with PeopleApiError
pub type PeopleApiResult<T> = Result<T, PeopleApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SourceError
pub type SourceResult<T> = Result<T, SourceError>;
