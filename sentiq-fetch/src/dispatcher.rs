//! Request dispatch with one fallback hop.
//!
//! The dispatch plan is an explicit ordered list of attempts consumed by a
//! single loop: the active connection first, then (only when the active
//! endpoint is the primary) the fallback under whichever scheme its base URL
//! embeds. On success via the fallback entry the caller is signaled to
//! promote it, making failover sticky until the next full resolution.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use sentiq_core::{ActiveConnection, AnalysisRecord, Endpoint, EndpointRole, Scheme};

use crate::error::FetchError;
use crate::transport::ApiTransport;
use crate::urls::{PREDICT_PATH, endpoint_url};
use crate::wire::{ErrorBody, PredictResponse};

// ============================================================================
// Dispatch Plan
// ============================================================================

/// One entry in the dispatch plan.
#[derive(Debug, Clone)]
struct Attempt {
    url: String,
    role: EndpointRole,
    scheme: Scheme,
}

/// Builds the ordered attempt list for one dispatch.
fn build_plan(
    connection: &ActiveConnection,
    fallback: &Endpoint,
) -> Result<Vec<Attempt>, FetchError> {
    // The active connection always goes first, under the scheme locked at
    // resolution time.
    let mut plan = vec![Attempt {
        url: endpoint_url(&connection.endpoint.base_url, connection.scheme, PREDICT_PATH)?,
        role: connection.endpoint.role,
        scheme: connection.scheme,
    }];

    // Exactly one fallback hop, and only while the primary is active.
    if connection.endpoint.role == EndpointRole::Primary {
        let scheme = fallback.embedded_scheme();
        plan.push(Attempt {
            url: endpoint_url(&fallback.base_url, scheme, PREDICT_PATH)?,
            role: fallback.role,
            scheme,
        });
    }

    Ok(plan)
}

// ============================================================================
// Dispatched
// ============================================================================

/// Successful outcome of a dispatch call.
#[derive(Debug, Clone)]
pub enum Dispatched {
    /// Input was empty or whitespace-only; nothing was sent.
    Skipped,
    /// The analysis completed.
    Completed {
        /// The completed record, stamped at completion time.
        record: AnalysisRecord,
        /// Which endpoint served the request.
        served_by: EndpointRole,
        /// Connection the caller should adopt for subsequent requests.
        /// Present only when the fallback served a request the primary
        /// connection failed.
        promote: Option<ActiveConnection>,
    },
}

// ============================================================================
// Request Dispatcher
// ============================================================================

/// Issues classification requests against the active connection.
pub struct RequestDispatcher {
    transport: Arc<dyn ApiTransport>,
}

impl RequestDispatcher {
    /// Creates a dispatcher over the given transport.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Runs one analysis against the active connection, with at most one
    /// fallback hop.
    ///
    /// Callers serialize invocations; attempts from two dispatches never
    /// interleave.
    #[instrument(skip_all, fields(len = text.len()))]
    pub async fn dispatch(
        &self,
        text: &str,
        connection: Option<&ActiveConnection>,
        fallback: &Endpoint,
    ) -> Result<Dispatched, FetchError> {
        if text.trim().is_empty() {
            debug!("Empty input, skipping analysis");
            return Ok(Dispatched::Skipped);
        }

        let Some(connection) = connection else {
            return Err(FetchError::NoEndpointAvailable);
        };

        let plan = build_plan(connection, fallback)?;
        let mut last_error: Option<FetchError> = None;

        for attempt in &plan {
            debug!(url = %attempt.url, role = ?attempt.role, "Attempting predict");

            let error = match self.transport.predict(&attempt.url, text).await {
                Ok(reply) if reply.is_success() => {
                    match serde_json::from_str::<PredictResponse>(&reply.body) {
                        Ok(parsed) => {
                            let record = AnalysisRecord::new(text, parsed.sentiment);
                            let promote = (attempt.role == EndpointRole::Fallback
                                && connection.endpoint.role == EndpointRole::Primary)
                                .then(|| ActiveConnection::new(fallback.clone(), attempt.scheme));

                            info!(
                                role = ?attempt.role,
                                sentiment = %record.sentiment,
                                promoted = promote.is_some(),
                                "Analysis completed"
                            );
                            return Ok(Dispatched::Completed {
                                record,
                                served_by: attempt.role,
                                promote,
                            });
                        }
                        Err(_) => FetchError::InvalidResponse(
                            "response body carries no sentiment field".to_string(),
                        ),
                    }
                }
                Ok(reply) => {
                    // The backend answered with an error; keep its detail so
                    // the user sees it verbatim.
                    let detail = serde_json::from_str::<ErrorBody>(&reply.body)
                        .ok()
                        .and_then(|body| body.detail)
                        .unwrap_or_else(|| format!("HTTP {}", reply.status_code));
                    FetchError::Backend {
                        status: reply.status_code,
                        detail,
                    }
                }
                Err(error) => error,
            };

            warn!(url = %attempt.url, role = ?attempt.role, error = %error, "Attempt failed");
            last_error = Some(error);
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts were made".to_string());
        Err(FetchError::AllEndpointsFailed { last_error })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::transport::{PredictReply, ProbeReply};

    /// Scripted transport: maps predict URLs to canned replies and records
    /// every call.
    struct MockTransport {
        replies: Vec<(String, Result<PredictReply, String>)>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(replies: Vec<(&str, Result<PredictReply, String>)>) -> Arc<Self> {
            Arc::new(Self {
                replies: replies
                    .into_iter()
                    .map(|(url, reply)| (url.to_string(), reply))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn probe(&self, _url: &str) -> Result<ProbeReply, FetchError> {
            unreachable!("dispatcher never probes")
        }

        async fn predict(&self, url: &str, _text: &str) -> Result<PredictReply, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.replies.iter().find(|(u, _)| u == url) {
                Some((_, Ok(reply))) => Ok(reply.clone()),
                Some((_, Err(message))) => Err(FetchError::Connect(message.clone())),
                None => Err(FetchError::Connect("connection refused".to_string())),
            }
        }
    }

    fn ok_reply(sentiment: &str) -> Result<PredictReply, String> {
        Ok(PredictReply {
            status_code: 200,
            body: format!(r#"{{"sentiment":"{sentiment}"}}"#),
        })
    }

    fn primary_connection() -> ActiveConnection {
        ActiveConnection::new(Endpoint::primary("https://a.example"), Scheme::Https)
    }

    fn fallback_endpoint() -> Endpoint {
        Endpoint::fallback("http://b.example")
    }

    #[tokio::test]
    async fn test_empty_input_is_skipped_without_network() {
        let transport = MockTransport::new(vec![]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let connection = primary_connection();
        for text in ["", "   ", "\n\t"] {
            let outcome = dispatcher
                .dispatch(text, Some(&connection), &fallback_endpoint())
                .await
                .unwrap();
            assert!(matches!(outcome, Dispatched::Skipped));
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_connection_is_rejected_without_network() {
        let transport = MockTransport::new(vec![]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let result = dispatcher.dispatch("text", None, &fallback_endpoint()).await;

        assert!(matches!(result, Err(FetchError::NoEndpointAvailable)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_primary_success_does_not_promote() {
        let transport =
            MockTransport::new(vec![("https://a.example/predict", ok_reply("positive"))]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let outcome = dispatcher
            .dispatch("great product", Some(&primary_connection()), &fallback_endpoint())
            .await
            .unwrap();

        let Dispatched::Completed {
            record,
            served_by,
            promote,
        } = outcome
        else {
            panic!("expected completion");
        };
        assert_eq!(record.sentiment, "positive");
        assert_eq!(record.text, "great product");
        assert_eq!(served_by, EndpointRole::Primary);
        assert!(promote.is_none());
        assert_eq!(transport.calls(), vec!["https://a.example/predict"]);
    }

    #[tokio::test]
    async fn test_primary_failure_takes_one_fallback_hop() {
        let transport = MockTransport::new(vec![
            ("https://a.example/predict", Err("refused".to_string())),
            ("http://b.example/predict", ok_reply("negative")),
        ]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let outcome = dispatcher
            .dispatch("bad product", Some(&primary_connection()), &fallback_endpoint())
            .await
            .unwrap();

        let Dispatched::Completed {
            served_by, promote, ..
        } = outcome
        else {
            panic!("expected completion");
        };
        assert_eq!(served_by, EndpointRole::Fallback);

        // The fallback's embedded scheme carries into the promotion.
        let promoted = promote.unwrap();
        assert_eq!(promoted.endpoint.role, EndpointRole::Fallback);
        assert_eq!(promoted.scheme, Scheme::Http);
        assert_eq!(
            transport.calls(),
            vec!["https://a.example/predict", "http://b.example/predict"]
        );
    }

    #[tokio::test]
    async fn test_fallback_connection_fails_terminally() {
        let transport = MockTransport::new(vec![]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let connection = ActiveConnection::new(fallback_endpoint(), Scheme::Http);
        let result = dispatcher
            .dispatch("text", Some(&connection), &fallback_endpoint())
            .await;

        assert!(matches!(result, Err(FetchError::AllEndpointsFailed { .. })));
        // The demoted primary is never re-attempted.
        assert_eq!(transport.calls(), vec!["http://b.example/predict"]);
    }

    #[tokio::test]
    async fn test_backend_detail_survives_exhaustion() {
        let transport = MockTransport::new(vec![
            (
                "https://a.example/predict",
                Ok(PredictReply {
                    status_code: 400,
                    body: r#"{"detail":"Text is required"}"#.to_string(),
                }),
            ),
            ("http://b.example/predict", Err("refused".to_string())),
        ]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let result = dispatcher
            .dispatch("text", Some(&primary_connection()), &fallback_endpoint())
            .await;

        // Both attempts ran; the terminal error reports the final failure.
        assert_eq!(transport.calls().len(), 2);
        assert!(matches!(result, Err(FetchError::AllEndpointsFailed { .. })));
    }

    #[tokio::test]
    async fn test_backend_error_alone_is_surfaced_with_detail() {
        let transport = MockTransport::new(vec![(
            "http://b.example/predict",
            Ok(PredictReply {
                status_code: 400,
                body: r#"{"detail":"Text is required"}"#.to_string(),
            }),
        )]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let connection = ActiveConnection::new(fallback_endpoint(), Scheme::Http);
        let result = dispatcher
            .dispatch("text", Some(&connection), &fallback_endpoint())
            .await;

        let Err(FetchError::AllEndpointsFailed { last_error }) = result else {
            panic!("expected exhaustion");
        };
        assert!(last_error.contains("Text is required"));
        assert!(last_error.contains("400"));
    }

    #[tokio::test]
    async fn test_success_without_sentiment_field_falls_back() {
        let transport = MockTransport::new(vec![
            (
                "https://a.example/predict",
                Ok(PredictReply {
                    status_code: 200,
                    body: "{}".to_string(),
                }),
            ),
            ("http://b.example/predict", ok_reply("neutral")),
        ]);
        let dispatcher = RequestDispatcher::new(transport.clone());

        let outcome = dispatcher
            .dispatch("meh", Some(&primary_connection()), &fallback_endpoint())
            .await
            .unwrap();

        let Dispatched::Completed { record, .. } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(record.sentiment, "neutral");
    }
}
