//! Connectivity status types.
//!
//! The controller exposes a single process-wide [`ApiStatus`] value,
//! overwritten on every resolution/dispatch outcome. Observers read
//! [`StatusSnapshot`]s and may consume structured [`StatusEvent`]s on each
//! transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Api Status
// ============================================================================

/// Coarse connectivity status of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// No resolution has completed yet.
    #[default]
    Unknown,
    /// The primary endpoint is active.
    Ready,
    /// The fallback endpoint is active.
    Fallback,
    /// All candidates are exhausted; recovery requires explicit re-resolution.
    Error,
}

impl ApiStatus {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Ready => "Ready",
            Self::Fallback => "Fallback",
            Self::Error => "Error",
        }
    }

    /// Returns true if requests can currently be dispatched.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Ready | Self::Fallback)
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Status Snapshot
// ============================================================================

/// The current status with its message and transition time.
///
/// Read-only view handed to observers; the controller owns the live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current status.
    pub status: ApiStatus,
    /// Optional detail, e.g. the terminal error description.
    pub message: Option<String>,
    /// When this status was entered.
    pub changed_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Creates the initial `Unknown` snapshot.
    pub fn unknown() -> Self {
        Self::new(ApiStatus::Unknown, None)
    }

    /// Creates a snapshot stamped with the current time.
    pub fn new(status: ApiStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            changed_at: Utc::now(),
        }
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::unknown()
    }
}

// ============================================================================
// Status Cause
// ============================================================================

/// What drove a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCause {
    /// An explicit resolution pass selected an endpoint (or exhausted all).
    Resolution,
    /// A request-time failover promoted the fallback.
    Failover,
    /// A dispatch outcome confirmed the serving endpoint.
    Dispatch,
    /// A dispatch or resolution exhausted every candidate.
    Exhaustion,
}

impl StatusCause {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::Failover => "failover",
            Self::Dispatch => "dispatch",
            Self::Exhaustion => "exhaustion",
        }
    }
}

impl std::fmt::Display for StatusCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Status Event
// ============================================================================

/// A structured status transition, emitted for logging/telemetry sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Status before the transition.
    pub from: ApiStatus,
    /// Status after the transition.
    pub to: ApiStatus,
    /// What drove the transition.
    pub cause: StatusCause,
    /// Optional detail carried into the new status.
    pub message: Option<String>,
    /// When the transition happened.
    pub at: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(ApiStatus::Ready.label(), "Ready");
        assert_eq!(ApiStatus::Error.to_string(), "Error");
    }

    #[test]
    fn test_status_usability() {
        assert!(ApiStatus::Ready.is_usable());
        assert!(ApiStatus::Fallback.is_usable());
        assert!(!ApiStatus::Unknown.is_usable());
        assert!(!ApiStatus::Error.is_usable());
    }

    #[test]
    fn test_initial_snapshot() {
        let snapshot = StatusSnapshot::unknown();
        assert_eq!(snapshot.status, ApiStatus::Unknown);
        assert!(snapshot.message.is_none());
    }
}
