//! Fetch error types.

use thiserror::Error;

/// Error type for probe and dispatch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed below the protocol level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The secure page context blocks plain-http access to this endpoint.
    #[error(
        "Mixed content: {0} is only reachable over plain http, which the secure page context blocks"
    )]
    MixedContentBlocked(String),

    /// The backend answered with an error of its own.
    #[error("Backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code the backend returned.
        status: u16,
        /// Detail message from the error body, verbatim.
        detail: String,
    },

    /// The backend answered 2xx but the body was not usable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured base URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Dispatch was requested with no active connection.
    #[error("No API endpoint available")]
    NoEndpointAvailable,

    /// Every attempt in the dispatch plan failed.
    #[error("All endpoints failed: {last_error}")]
    AllEndpointsFailed {
        /// Description of the final attempt's failure.
        last_error: String,
    },
}

impl FetchError {
    /// Returns true for transport-level failures the next attempt in a plan
    /// may recover from, as opposed to errors the backend itself reported.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Timeout(_)
                | Self::Connect(_)
                | Self::MixedContentBlocked(_)
        )
    }
}
