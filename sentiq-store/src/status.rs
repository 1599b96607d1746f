//! The observable connectivity state machine.
//!
//! The reporter owns the single process-wide [`ApiStatus`] value and emits a
//! structured [`StatusEvent`] on every transition, both as a tracing record
//! and on a watch channel observers can subscribe to.
//!
//! Transition table:
//! - `Unknown` → `Ready` when resolution selects the primary.
//! - `Unknown`/`Ready` → `Fallback` when resolution or a request-time
//!   failover selects the fallback.
//! - Any → `Error` when resolution or dispatch exhausts every candidate.
//! - `Error` is left only via an explicit re-resolution; dispatch outcomes
//!   never clear it.

use sentiq_core::{ApiStatus, StatusCause, StatusEvent, StatusSnapshot};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

/// Derives and exposes the coarse connectivity status.
pub struct StatusReporter {
    snapshot: RwLock<StatusSnapshot>,
    notify: watch::Sender<StatusSnapshot>,
}

impl StatusReporter {
    /// Creates a reporter in the initial `Unknown` state.
    pub fn new() -> Self {
        let initial = StatusSnapshot::unknown();
        let (notify, _) = watch::channel(initial.clone());
        Self {
            snapshot: RwLock::new(initial),
            notify,
        }
    }

    /// Returns the current snapshot.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.notify.subscribe()
    }

    /// Applies a transition, returning the emitted event.
    ///
    /// Returns `None` when nothing changed (idempotent set) or when the
    /// transition is not legal: leaving `Error` requires an explicit
    /// re-resolution, so any other cause keeps the terminal state.
    pub async fn report(
        &self,
        to: ApiStatus,
        cause: StatusCause,
        message: Option<String>,
    ) -> Option<StatusEvent> {
        let mut snapshot = self.snapshot.write().await;

        if snapshot.status == to && snapshot.message == message {
            return None;
        }

        if snapshot.status == ApiStatus::Error
            && to != ApiStatus::Error
            && cause != StatusCause::Resolution
        {
            debug!(to = %to, cause = %cause, "Ignoring transition out of Error without re-resolution");
            return None;
        }

        let next = StatusSnapshot::new(to, message.clone());
        let event = StatusEvent {
            from: snapshot.status,
            to,
            cause,
            message,
            at: next.changed_at,
        };

        info!(
            from = %event.from,
            to = %event.to,
            cause = %event.cause,
            message = event.message.as_deref().unwrap_or(""),
            "Status transition"
        );

        *snapshot = next.clone();
        let _ = self.notify.send(next);
        Some(event)
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
