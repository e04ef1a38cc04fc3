//! Custom error types for vateller
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for vateller operations
#[derive(Error, Debug)]
pub enum TellerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Transport-level HTTP errors (connection refused, timeout, bad TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// A gateway answered with a non-success status
    #[error("Gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    /// Token acquisition exhausted its retry budget
    #[error("Authentication failed against {backend} after {attempts} attempts")]
    Auth { backend: &'static str, attempts: u32 },
}

impl TellerError {
    /// Create a gateway error from a status code and response body
    pub fn gateway(status: u16, message: impl Into<String>) -> Self {
        Self::Gateway {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a gateway (non-2xx) error
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TellerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TellerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for TellerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for vateller operations
pub type TellerResult<T> = Result<T, TellerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TellerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_gateway_error() {
        let err = TellerError::gateway(502, "upstream down");
        assert_eq!(err.to_string(), "Gateway returned 502: upstream down");
        assert!(err.is_gateway());
    }

    #[test]
    fn test_auth_error_display() {
        let err = TellerError::Auth {
            backend: "internal",
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Authentication failed against internal after 3 attempts"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let teller_err: TellerError = io_err.into();
        assert!(matches!(teller_err, TellerError::Io(_)));
    }
}
