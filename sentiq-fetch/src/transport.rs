//! The transport seam between the controller and the wire.
//!
//! Resolver and dispatcher never touch reqwest directly; they speak
//! [`ApiTransport`]. Production uses [`crate::client::HttpClient`], tests
//! use scripted mocks.

use async_trait::async_trait;

use crate::error::FetchError;

/// Reply to a health probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeReply {
    /// HTTP status code of the probe response.
    pub status_code: u16,
}

impl ProbeReply {
    /// Any response below 500 counts as reachable; the body is ignored.
    pub fn reachable(&self) -> bool {
        self.status_code < 500
    }
}

/// Reply to a classification request.
///
/// The body is carried raw; the dispatcher decides whether to read a
/// sentiment label or an error detail out of it.
#[derive(Debug, Clone)]
pub struct PredictReply {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
}

impl PredictReply {
    /// Returns true for a 2xx response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Object-safe access to the backend's two routes.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// `GET {url}` under the probe timeout. Transport failures map to `Err`;
    /// any HTTP response, including 5xx, maps to `Ok`.
    async fn probe(&self, url: &str) -> Result<ProbeReply, FetchError>;

    /// `POST {url}` with the JSON `{"text": ...}` payload under the predict
    /// timeout.
    async fn predict(&self, url: &str, text: &str) -> Result<PredictReply, FetchError>;
}
