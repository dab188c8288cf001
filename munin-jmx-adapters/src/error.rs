//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur when reading attributes through an adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
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

    /// The gateway rejected a single read (unknown MBean, missing attribute, ...).
    #[error("Read of {mbean} {attribute} failed with status {status}: {message}")]
    Remote {
        mbean: String,
        attribute: String,
        status: u16,
        message: String,
    },

    /// A read could not be built from the configuration.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

#[cfg(feature = "jolokia")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}
