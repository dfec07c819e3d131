//! Error types for the export sink.

use thiserror::Error;

/// Errors that can occur when exporting metrics to a document store.
#[derive(Debug, Error)]
pub enum ExportError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse a response or configuration.
    #[error("Failed to parse: {0}")]
    Parse(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Export configuration is missing or invalid.
    #[error("Invalid export configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExportError::Timeout
        } else if err.is_connect() {
            ExportError::Connection(err.to_string())
        } else {
            ExportError::Http(err.to_string())
        }
    }
}
