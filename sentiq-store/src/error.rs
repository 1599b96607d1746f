//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A second analysis was requested while one is in flight.
    #[error("Analysis already in progress")]
    AnalysisInProgress,

    /// Probe or dispatch failure.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] sentiq_fetch::FetchError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] sentiq_core::CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
