//! Error handling for the Prediction SDK
//!
//! This module provides the error taxonomy surfaced by the prediction client:
//! - Distinguishes an unreachable service from other transport failures
//! - Carries the HTTP status line for non-success replies
//! - Maps reqwest/serde failures to normalized variants
//! - Provides convenient Result type alias

use std::io;
use thiserror::Error;

pub mod mapping;

/// Result type for Prediction SDK operations
pub type Result<T> = std::result::Result<T, PredictionError>;

/// Main error type for the Prediction SDK
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The prediction service refused the connection (not running)
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// The prediction service answered with a non-success status
    #[error("Prediction service responded with {status} {reason}")]
    RemoteHttp {
        status: u16,
        reason: String,
        body: Option<String>,
    },

    /// Any other transport failure (DNS, reset, timeout, redirects)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The reply body could not be decoded
    #[error("Invalid response from prediction service: {0}")]
    Decode(String),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PredictionError {
    /// Create a connection refused error
    pub fn connection_refused(message: impl Into<String>) -> Self {
        PredictionError::ConnectionRefused(message.into())
    }

    /// Create a remote HTTP status error
    pub fn remote_http(status: u16, reason: impl Into<String>, body: Option<String>) -> Self {
        PredictionError::RemoteHttp {
            status,
            reason: reason.into(),
            body,
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        PredictionError::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        PredictionError::Decode(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        PredictionError::Configuration(message.into())
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PredictionError::RemoteHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the service could not be reached at all
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, PredictionError::ConnectionRefused(_))
    }
}

/// Walk the source chain looking for a refused TCP connect.
fn refused_in_chain(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Convert reqwest errors to PredictionError
impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() && refused_in_chain(&err) {
            PredictionError::connection_refused(err.to_string())
        } else if let Some(status) = err.status() {
            PredictionError::remote_http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                None,
            )
        } else if err.is_decode() {
            PredictionError::decode(err.to_string())
        } else if err.is_builder() {
            PredictionError::configuration(format!("Invalid request: {}", err))
        } else if err.is_timeout() {
            PredictionError::transport(format!("Request timed out: {}", err))
        } else {
            PredictionError::transport(err.to_string())
        }
    }
}

/// Convert serde_json errors to PredictionError
impl From<serde_json::Error> for PredictionError {
    fn from(err: serde_json::Error) -> Self {
        PredictionError::decode(format!("JSON error: {}", err))
    }
}

/// Convert url parse errors to PredictionError
impl From<url::ParseError> for PredictionError {
    fn from(err: url::ParseError) -> Self {
        PredictionError::configuration(format!("Invalid URL: {}", err))
    }
}
