//! # Common Error Types
//!
//! Every fallible operation in the portal returns [`ApiError`].
//!
//! ## Error Categories
//!
//! - **Network**: no response was obtained (DNS failure, connection refused, reset).
//!   Carries the backend origin so views can say "check your connection".
//! - **Request**: the backend answered with a non-success status. Carries the
//!   best-effort message extracted from the body so views can say "check your input".
//! - **Timeout** / **Cancelled**: the caller's deadline or cancellation token fired.
//! - **Decode**: a success response whose body was not the expected JSON.
//! - **Validation**: input rejected client-side before any request was sent.
//! - **Storage**: the persistent session store could not be read or written.
//! - **Config**: invalid or missing configuration.
//!
//! An expired session never surfaces on its own: the request client renews once
//! and retries, and if that fails the original 401 comes back as `Request`.
//!
//! ```rust
//! use portal::core::error::ApiError;
//!
//! let err = ApiError::Request { status: 400, message: "Insufficient balance".to_string() };
//! assert_eq!(err.to_string(), "Insufficient balance");
//! assert_eq!(err.user_message("Exchange failed"), "Insufficient balance");
//! assert!(!err.is_network());
//! ```

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Transport failure; no HTTP response was received.
    #[error("Network error: could not connect to API at {origin}. Check the server or URL.")]
    Network { origin: String, reason: String },

    /// The backend responded with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Request to {origin} timed out after {after:?}")]
    Timeout { origin: String, after: Duration },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Human-readable description. Never empty.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            match self {
                ApiError::Request { status, .. } => format!("Request failed with status {status}"),
                _ => "Unexpected error".to_string(),
            }
        } else {
            message
        }
    }

    /// The message a view should show: specific messages pass through, internal
    /// failures (decode, storage, config) are replaced by `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Decode(_) | ApiError::Storage(_) | ApiError::Config(_) => fallback.to_string(),
            ApiError::Request { message, .. } | ApiError::Validation(message)
                if message.trim().is_empty() =>
            {
                fallback.to_string()
            }
            _ => self.message(),
        }
    }

    /// Transport-level failure, as opposed to an answer from the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// HTTP status of a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_message_names_origin() {
        let err = ApiError::Network {
            origin: "http://127.0.0.1:8000".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.message().contains("http://127.0.0.1:8000"));
        assert!(err.is_network());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_blank_request_message_gets_status() {
        let err = ApiError::Request {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.message(), "Request failed with status 502");
        assert_eq!(err.user_message("Try again"), "Try again");
    }

    #[test]
    fn test_user_message_hides_internal_failures() {
        let err = ApiError::Decode("expected value at line 1".to_string());
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");

        let err = ApiError::Validation("Amount must be greater than 0".to_string());
        assert_eq!(err.user_message("Something went wrong"), "Amount must be greater than 0");
    }

    #[test]
    fn test_timeout_display() {
        let err = ApiError::Timeout {
            origin: "http://api".to_string(),
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "Request to http://api timed out after 5s");
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::Request {
            status: 401,
            message: "Authentication credentials were not provided.".to_string(),
        };
        assert!(err.is_unauthorized());
    }
}
