//! Core error types for Sentiq.

use thiserror::Error;

/// Core error type for Sentiq operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An endpoint base URL is malformed or uses an unsupported scheme.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
