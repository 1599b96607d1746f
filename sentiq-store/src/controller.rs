//! The API-access controller.
//!
//! Owns the pieces the UI must never mutate directly: the single
//! [`ActiveConnection`], the status machine, and the history log. The UI
//! layer reads snapshots and subscribes to status changes; all mutation
//! funnels through [`Controller::resolve`] and [`Controller::analyze`].

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{info, warn};

use sentiq_core::{ActiveConnection, AnalysisRecord, ApiStatus, Endpoint, EndpointRole, StatusCause, StatusSnapshot};
use sentiq_fetch::{
    ApiTransport, Dispatched, EndpointResolver, FetchError, HttpClient, RequestDispatcher,
    ResolveOutcome,
};

use crate::config::Config;
use crate::error::StoreError;
use crate::history::HistoryStore;
use crate::status::StatusReporter;

/// Actionable message shown when resolution failed because the secure page
/// context blocked plain-http access, rather than the endpoints being down.
const MIXED_CONTENT_MESSAGE: &str = "An endpoint answers only over plain http, which the secure \
    page context blocks. Allow insecure content for this surface or configure an https endpoint.";

/// Generic message for a resolution pass that exhausted every candidate.
const NO_ENDPOINT_MESSAGE: &str = "No API endpoint is reachable";

/// The resilient API-access controller.
pub struct Controller {
    resolver: EndpointResolver,
    dispatcher: RequestDispatcher,
    primary: Endpoint,
    fallback: Endpoint,
    connection: RwLock<Option<ActiveConnection>>,
    reporter: StatusReporter,
    history: RwLock<HistoryStore>,
    history_path: PathBuf,
    analyze_gate: Mutex<()>,
}

impl Controller {
    /// Creates a controller over an explicit transport.
    ///
    /// Restores history from durable storage; a load failure degrades to an
    /// empty history rather than failing startup.
    pub async fn new(config: Config, transport: Arc<dyn ApiTransport>) -> Result<Self, StoreError> {
        config.validate()?;

        let [primary, fallback] = config.endpoints();
        let history_path = config.history_path();
        let history = HistoryStore::load(&history_path).await;

        Ok(Self {
            resolver: EndpointResolver::new(transport.clone())
                .with_secure_context(config.secure_context),
            dispatcher: RequestDispatcher::new(transport),
            primary,
            fallback,
            connection: RwLock::new(None),
            reporter: StatusReporter::new(),
            history: RwLock::new(history),
            history_path,
            analyze_gate: Mutex::new(()),
        })
    }

    /// Creates a controller over the reqwest transport.
    pub async fn with_http(config: Config) -> Result<Self, StoreError> {
        let transport = Arc::new(HttpClient::new().map_err(StoreError::Fetch)?);
        Self::new(config, transport).await
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Probes the candidates in priority order and installs the winner.
    ///
    /// This is the only path that leaves the `Error` state.
    pub async fn resolve(&self) -> ResolveOutcome {
        let candidates = [self.primary.clone(), self.fallback.clone()];
        let outcome = self.resolver.resolve(&candidates).await;

        match &outcome.connection {
            Some(connection) => {
                let status = match connection.role() {
                    EndpointRole::Primary => ApiStatus::Ready,
                    EndpointRole::Fallback => ApiStatus::Fallback,
                };
                *self.connection.write().await = Some(connection.clone());
                self.reporter
                    .report(status, StatusCause::Resolution, None)
                    .await;
            }
            None => {
                let message = if outcome.mixed_content_blocked() {
                    MIXED_CONTENT_MESSAGE
                } else {
                    NO_ENDPOINT_MESSAGE
                };
                *self.connection.write().await = None;
                self.reporter
                    .report(
                        ApiStatus::Error,
                        StatusCause::Exhaustion,
                        Some(message.to_string()),
                    )
                    .await;
            }
        }

        outcome
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Runs one analysis against the current connection.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only input, which is
    /// ignored without network I/O. At most one analysis is in flight at a
    /// time; a concurrent call is rejected with
    /// [`StoreError::AnalysisInProgress`].
    ///
    /// A terminal failure transitions status to `Error` and leaves the stale
    /// connection in place: no automatic re-resolution follows, so the next
    /// call triggers its own failover attempt against the stale connection.
    pub async fn analyze(&self, text: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        let Ok(_guard) = self.analyze_gate.try_lock() else {
            return Err(StoreError::AnalysisInProgress);
        };

        let connection = self.connection.read().await.clone();
        let dispatched = self
            .dispatcher
            .dispatch(text, connection.as_ref(), &self.fallback)
            .await;

        match dispatched {
            Ok(Dispatched::Skipped) => Ok(None),
            Ok(Dispatched::Completed {
                record,
                served_by,
                promote,
            }) => {
                let promoted = promote.is_some();
                if let Some(new_connection) = promote {
                    info!(
                        endpoint = %new_connection.endpoint.base_url,
                        "Promoting fallback to active connection"
                    );
                    *self.connection.write().await = Some(new_connection);
                }

                let status = match served_by {
                    EndpointRole::Primary => ApiStatus::Ready,
                    EndpointRole::Fallback => ApiStatus::Fallback,
                };
                let cause = if promoted {
                    StatusCause::Failover
                } else {
                    StatusCause::Dispatch
                };
                self.reporter.report(status, cause, None).await;

                // In-memory append first; a failed save never blocks it.
                {
                    let mut history = self.history.write().await;
                    history.append(record.clone());
                    if let Err(error) = history.save(&self.history_path).await {
                        warn!(error = %error, "Failed to persist history");
                    }
                }

                Ok(Some(record))
            }
            Err(FetchError::NoEndpointAvailable) => {
                // Nothing was attempted; the status value already reflects
                // why there is no connection.
                Err(StoreError::Fetch(FetchError::NoEndpointAvailable))
            }
            Err(error) => {
                self.reporter
                    .report(
                        ApiStatus::Error,
                        StatusCause::Exhaustion,
                        Some(error.to_string()),
                    )
                    .await;
                Err(StoreError::Fetch(error))
            }
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Returns the current status snapshot.
    pub async fn status(&self) -> StatusSnapshot {
        self.reporter.snapshot().await
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.reporter.subscribe()
    }

    /// Returns the connection currently trusted for dispatch, for display.
    pub async fn connection(&self) -> Option<ActiveConnection> {
        self.connection.read().await.clone()
    }

    /// Returns the analysis history in completion order.
    pub async fn history(&self) -> Vec<AnalysisRecord> {
        self.history.read().await.all().to_vec()
    }
}
