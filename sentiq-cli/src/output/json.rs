//! JSON output formatting for scripting.

use serde::Serialize;
use sentiq_core::{ActiveConnection, ProbeResult, StatusSnapshot};

/// Probe outcome report for `sentiq check --format json`.
#[derive(Serialize)]
pub struct ProbeReport<'a> {
    /// Whether a connection was selected.
    pub resolved: bool,
    /// Whether any attempt was blocked by the secure page context.
    pub mixed_content_blocked: bool,
    /// The selected connection, if any.
    pub connection: Option<&'a ActiveConnection>,
    /// Every probe attempt, in order.
    pub probes: &'a [ProbeResult],
}

/// Status report for `sentiq status --format json`.
#[derive(Serialize)]
pub struct StatusReport<'a> {
    /// The current status snapshot.
    pub status: &'a StatusSnapshot,
    /// The active connection, if any.
    pub connection: Option<&'a ActiveConnection>,
}

/// JSON formatter with optional pretty-printing.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Renders any serializable value.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}
