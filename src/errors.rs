use thiserror::Error;

use crate::config::ConfigError;

/// Failures of a single model call.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error when calling model API: {0}")]
    Network(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Malformed model API response: {0}")]
    MalformedResponse(String),

    #[error("Failed to build model API request: {0}")]
    Request(String),
}

impl TransportError {
    /// Map a reqwest failure onto the transport taxonomy, logging what kind it was.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        use log::warn;

        if err.is_timeout() {
            warn!("Request timed out");
        }
        if err.is_connect() {
            warn!("Connection error - check network connectivity");
        }
        if err.is_builder() || err.is_request() {
            warn!("Request construction error");
            return TransportError::Request(err.to_string());
        }
        if err.is_decode() {
            return TransportError::MalformedResponse(err.to_string());
        }
        TransportError::Network(err.to_string())
    }
}

/// Custom error types for the competitor monitor
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Model transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type specific to monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
