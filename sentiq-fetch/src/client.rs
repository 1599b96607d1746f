//! The reqwest-backed transport.

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::transport::{ApiTransport, PredictReply, ProbeReply};
use crate::wire::PredictRequest;

/// Health probes give up after this many seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Classification requests give up after this many seconds.
pub const PREDICT_TIMEOUT_SECS: u64 = 20;

/// HTTP transport over a single shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates the transport.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("sentiq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner: client })
    }
}

#[async_trait]
impl ApiTransport for HttpClient {
    async fn probe(&self, url: &str) -> Result<ProbeReply, FetchError> {
        debug!(url = %url, "Sending probe");

        let response = self
            .inner
            .get(url)
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| map_send_error(e, PROBE_TIMEOUT_SECS))?;

        Ok(ProbeReply {
            status_code: response.status().as_u16(),
        })
    }

    async fn predict(&self, url: &str, text: &str) -> Result<PredictReply, FetchError> {
        debug!(url = %url, "Sending predict request");

        let response = self
            .inner
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&PredictRequest { text })
            .timeout(Duration::from_secs(PREDICT_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| map_send_error(e, PREDICT_TIMEOUT_SECS))?;

        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(FetchError::Http)?;

        Ok(PredictReply { status_code, body })
    }
}

/// Maps a reqwest send failure onto the fetch taxonomy.
fn map_send_error(error: reqwest::Error, timeout_secs: u64) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout_secs)
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Http(error)
    }
}
