//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all layers of Reelcache.
///
/// Lookups degrade provider failures to "not found"; cache connectivity
/// and decode failures always reach the caller.
#[derive(Error, Debug)]
pub enum ReelError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ============ Infrastructure Errors ============
    /// The key-value store could not be reached or rejected a command
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The metadata provider answered with a non-success status or could not be reached
    #[error("Provider unavailable: {message}")]
    ProviderUnavailable {
        status: Option<u16>,
        message: String,
    },

    /// A stored or provider-returned payload is not valid structured data
    #[error("Decode error: {0}")]
    Decode(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::ProviderUnavailable { .. } | Self::Decode(_) => 502,
            Self::CacheUnavailable(_) => 503,
            Self::Timeout(_) => 504,
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::ProviderUnavailable { .. } => "PROVIDER_UNAVAILABLE",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a cache connectivity error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates a provider error, optionally carrying the HTTP status the provider answered with.
    #[must_use]
    pub fn provider<T: Into<String>>(status: Option<u16>, message: T) -> Self {
        Self::ProviderUnavailable {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks whether this error means the provider could not serve the request.
    ///
    /// The lookup service maps these to its not-found signal.
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. } | Self::Timeout(_))
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ReelError`.
    #[must_use]
    pub fn from_error(error: &ReelError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&ReelError> for ErrorResponse {
    fn from(error: &ReelError) -> Self {
        Self::from_error(error)
    }
}
