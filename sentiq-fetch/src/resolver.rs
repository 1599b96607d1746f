//! Endpoint resolution.
//!
//! The resolver walks candidates in strict priority order and probes each
//! under `https` first, then `http`. The first reachable scheme wins and no
//! further candidates are probed. It is a pure selection function over the
//! candidate list; callers decide how to store the result.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use sentiq_core::{ActiveConnection, Endpoint, ProbeResult, Scheme};

use crate::error::FetchError;
use crate::transport::ApiTransport;
use crate::urls::{STATUS_PATH, endpoint_url};

// ============================================================================
// Resolve Outcome
// ============================================================================

/// The outcome of a resolution pass.
#[derive(Debug)]
pub struct ResolveOutcome {
    /// The selected connection, if any candidate answered.
    pub connection: Option<ActiveConnection>,
    /// Every probe attempt made, in order.
    pub probes: Vec<ProbeResult>,
}

impl ResolveOutcome {
    /// Returns true if a candidate was selected.
    pub fn is_resolved(&self) -> bool {
        self.connection.is_some()
    }

    /// Returns true if any attempt was blocked by the secure page context
    /// rather than failing on the network. Callers use this to present an
    /// actionable mixed-content message instead of a generic one.
    pub fn mixed_content_blocked(&self) -> bool {
        self.probes.iter().any(|p| p.mixed_content)
    }
}

// ============================================================================
// Endpoint Resolver
// ============================================================================

/// Probes candidate endpoints and selects the one to use.
pub struct EndpointResolver {
    transport: Arc<dyn ApiTransport>,
    secure_context: bool,
}

impl EndpointResolver {
    /// Creates a resolver over the given transport.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            secure_context: false,
        }
    }

    /// Marks the embedding surface as https-only. Plain-http probes are then
    /// not attempted and are recorded as mixed-content blocks.
    pub fn with_secure_context(mut self, secure_context: bool) -> Self {
        self.secure_context = secure_context;
        self
    }

    /// Resolves the active connection from candidates in priority order.
    ///
    /// The first candidate is fully tried before the second is considered;
    /// the first reachable scheme returns immediately.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn resolve(&self, candidates: &[Endpoint]) -> ResolveOutcome {
        let mut probes = Vec::new();

        for endpoint in candidates {
            for scheme in [Scheme::Https, Scheme::Http] {
                let result = self.probe(endpoint, scheme).await;
                let reachable = result.is_reachable();
                probes.push(result);

                if reachable {
                    info!(
                        endpoint = %endpoint.base_url,
                        role = ?endpoint.role,
                        scheme = %scheme,
                        "Endpoint selected"
                    );
                    return ResolveOutcome {
                        connection: Some(ActiveConnection::new(endpoint.clone(), scheme)),
                        probes,
                    };
                }
            }
        }

        warn!("No endpoint reachable under any scheme");
        ResolveOutcome {
            connection: None,
            probes,
        }
    }

    /// Probes one candidate under one scheme against the `/status` route.
    async fn probe(&self, endpoint: &Endpoint, scheme: Scheme) -> ProbeResult {
        if self.secure_context && scheme == Scheme::Http {
            debug!(endpoint = %endpoint.base_url, "Skipping plain-http probe in secure context");
            return ProbeResult {
                endpoint: endpoint.clone(),
                reachable_scheme: None,
                latency_ms: 0,
                error: Some(FetchError::MixedContentBlocked(endpoint.base_url.clone()).to_string()),
                mixed_content: true,
            };
        }

        let url = match endpoint_url(&endpoint.base_url, scheme, STATUS_PATH) {
            Ok(url) => url,
            Err(error) => {
                warn!(endpoint = %endpoint.base_url, error = %error, "Unprobeable base URL");
                return ProbeResult {
                    endpoint: endpoint.clone(),
                    reachable_scheme: None,
                    latency_ms: 0,
                    error: Some(error.to_string()),
                    mixed_content: false,
                };
            }
        };

        let start = Instant::now();
        debug!(url = %url, "Probing");

        match self.transport.probe(&url).await {
            Ok(reply) if reply.reachable() => ProbeResult {
                endpoint: endpoint.clone(),
                reachable_scheme: Some(scheme),
                latency_ms: elapsed_ms(start),
                error: None,
                mixed_content: false,
            },
            Ok(reply) => ProbeResult {
                endpoint: endpoint.clone(),
                reachable_scheme: None,
                latency_ms: elapsed_ms(start),
                error: Some(format!("status {}", reply.status_code)),
                mixed_content: false,
            },
            Err(error) => ProbeResult {
                endpoint: endpoint.clone(),
                reachable_scheme: None,
                latency_ms: elapsed_ms(start),
                error: Some(error.to_string()),
                mixed_content: false,
            },
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sentiq_core::EndpointRole;
    use std::sync::Mutex;

    use crate::transport::{PredictReply, ProbeReply};

    /// Transport that answers probes for an allowlist of URLs and records
    /// every URL it sees.
    struct MockTransport {
        reachable: Vec<String>,
        seen: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(reachable: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                reachable: reachable.iter().map(|s| (*s).to_string()).collect(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn probe(&self, url: &str) -> Result<ProbeReply, FetchError> {
            self.seen.lock().unwrap().push(url.to_string());
            if self.reachable.iter().any(|r| r == url) {
                Ok(ProbeReply { status_code: 200 })
            } else {
                Err(FetchError::Connect("connection refused".to_string()))
            }
        }

        async fn predict(&self, _url: &str, _text: &str) -> Result<PredictReply, FetchError> {
            unreachable!("resolver never dispatches")
        }
    }

    fn candidates() -> Vec<Endpoint> {
        vec![
            Endpoint::primary("https://a.example"),
            Endpoint::fallback("http://b.example"),
        ]
    }

    #[tokio::test]
    async fn test_healthy_primary_stops_probing() {
        let transport = MockTransport::new(&["https://a.example/status"]);
        let resolver = EndpointResolver::new(transport.clone());

        let outcome = resolver.resolve(&candidates()).await;

        let connection = outcome.connection.unwrap();
        assert_eq!(connection.endpoint.role, EndpointRole::Primary);
        assert_eq!(connection.scheme, Scheme::Https);
        assert_eq!(transport.seen(), vec!["https://a.example/status"]);
    }

    #[tokio::test]
    async fn test_dead_primary_falls_back_to_http() {
        let transport = MockTransport::new(&["http://b.example/status"]);
        let resolver = EndpointResolver::new(transport.clone());

        let outcome = resolver.resolve(&candidates()).await;

        let connection = outcome.connection.unwrap();
        assert_eq!(connection.endpoint.role, EndpointRole::Fallback);
        assert_eq!(connection.scheme, Scheme::Http);
        // Two schemes for the primary, two for the fallback, nothing more.
        assert_eq!(
            transport.seen(),
            vec![
                "https://a.example/status",
                "http://a.example/status",
                "https://b.example/status",
                "http://b.example/status",
            ]
        );
        assert_eq!(outcome.probes.len(), 4);
    }

    #[tokio::test]
    async fn test_all_dead_returns_none() {
        let transport = MockTransport::new(&[]);
        let resolver = EndpointResolver::new(transport.clone());

        let outcome = resolver.resolve(&candidates()).await;

        assert!(outcome.connection.is_none());
        assert_eq!(outcome.probes.len(), 4);
        assert!(outcome.probes.iter().all(|p| !p.is_reachable()));
    }

    #[tokio::test]
    async fn test_secure_context_blocks_plain_http() {
        // b is reachable, but only over plain http.
        let transport = MockTransport::new(&["http://b.example/status"]);
        let resolver = EndpointResolver::new(transport.clone()).with_secure_context(true);

        let outcome = resolver.resolve(&candidates()).await;

        assert!(outcome.connection.is_none());
        assert!(outcome.mixed_content_blocked());
        // Only the https probes hit the network.
        assert_eq!(
            transport.seen(),
            vec!["https://a.example/status", "https://b.example/status"]
        );
    }

    #[tokio::test]
    async fn test_500_is_unreachable() {
        struct ServerError;

        #[async_trait]
        impl ApiTransport for ServerError {
            async fn probe(&self, _url: &str) -> Result<ProbeReply, FetchError> {
                Ok(ProbeReply { status_code: 503 })
            }
            async fn predict(&self, _url: &str, _text: &str) -> Result<PredictReply, FetchError> {
                unreachable!()
            }
        }

        let resolver = EndpointResolver::new(Arc::new(ServerError));
        let outcome = resolver.resolve(&candidates()).await;

        assert!(outcome.connection.is_none());
        assert!(outcome.probes.iter().all(|p| p.error.is_some()));
    }
}
