//! Error types for the ESI client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Message carried by [`Error::Forbidden`]
pub const ACCESS_DENIED: &str = "Access denied";

/// Message carried by [`Error::Authorization`]
pub const MISSING_TOKEN: &str = "Missing required authorization token";

/// The main error type for the ESI client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // API Errors
    // ============================================================================
    /// Generic API failure: server errors, bad requests, spec download failures
    #[error("ESI error: {0}")]
    Esi(String),

    /// The remote resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote side denied access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The operation requires a bearer token and none was supplied
    #[error("Authorization error: {0}")]
    Authorization(String),

    // ============================================================================
    // Lookup Errors
    // ============================================================================
    /// No resource group with the requested name
    #[error("Resource {name} not found. Available resources: {available}")]
    ResourceNotFound {
        /// Requested name
        name: String,
        /// Comma-separated resource names
        available: String,
    },

    /// No operation with the requested name in the resource group
    #[error("Operation {name} not found on resource {resource}. Available operations: {available}")]
    OperationNotFound {
        /// Resource the lookup ran against
        resource: String,
        /// Requested name
        name: String,
        /// Comma-separated operation names
        available: String,
    },

    // ============================================================================
    // Request Construction Errors
    // ============================================================================
    /// Caller arguments do not fit the operation's declared parameters
    #[error("Invalid parameters for operation '{operation}': {message}")]
    Parameter {
        /// Operation name
        operation: String,
        /// What was wrong
        message: String,
    },

    /// The Swagger document could not be turned into a catalogue
    #[error("Invalid API specification: {message}")]
    Spec {
        /// What was wrong
        message: String,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with no dedicated variant
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Malformed endpoint or base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Malformed YAML config
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Malformed JSON payload
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a generic API error
    pub fn esi(message: impl Into<String>) -> Self {
        Self::Esi(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create the access-denied error
    pub fn forbidden() -> Self {
        Self::Forbidden(ACCESS_DENIED.to_string())
    }

    /// Create the missing-token error
    pub fn missing_token() -> Self {
        Self::Authorization(MISSING_TOKEN.to_string())
    }

    /// Create a parameter error for an operation
    pub fn parameter(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parameter {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a spec error
    pub fn spec(message: impl Into<String>) -> Self {
        Self::Spec {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Check if this is the generic API error
    pub fn is_esi(&self) -> bool {
        matches!(self, Error::Esi(_))
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Forbidden(_))
    }

    /// Check if this is a missing-authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Error::Authorization(_))
    }

    /// The message carried by the four API signal variants
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Esi(m) | Error::NotFound(m) | Error::Forbidden(m) | Error::Authorization(m) => {
                Some(m)
            }
            _ => None,
        }
    }
}

/// Result type alias for the ESI client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::esi("500 Internal Server Error: boom");
        assert_eq!(err.to_string(), "ESI error: 500 Internal Server Error: boom");

        let err = Error::forbidden();
        assert_eq!(err.to_string(), "Forbidden: Access denied");

        let err = Error::http_status(420, "Error limited");
        assert_eq!(err.to_string(), "HTTP 420: Error limited");

        let err = Error::ResourceNotFound {
            name: "Bogus".to_string(),
            available: "Alliance, Character".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Resource Bogus not found. Available resources: Alliance, Character"
        );
    }

    #[test]
    fn test_classifiers() {
        assert!(Error::esi("x").is_esi());
        assert!(Error::not_found("x").is_not_found());
        assert!(Error::forbidden().is_forbidden());
        assert!(Error::missing_token().is_authorization());

        assert!(!Error::config("x").is_esi());
        assert!(!Error::http_status(404, "").is_not_found());
    }

    #[test]
    fn test_message() {
        assert_eq!(Error::not_found("X not found").message(), Some("X not found"));
        assert_eq!(Error::missing_token().message(), Some(MISSING_TOKEN));
        assert_eq!(Error::config("nope").message(), None);
    }
}
