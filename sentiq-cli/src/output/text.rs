//! Text output formatting with colors.

use chrono::Local;
use sentiq_core::{ActiveConnection, AnalysisRecord, ApiStatus, ProbeResult, StatusSnapshot};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one completed analysis, with the serving endpoint indicator.
    pub fn format_record(
        &self,
        record: &AnalysisRecord,
        connection: Option<&ActiveConnection>,
    ) -> String {
        let sentiment = record.sentiment.to_uppercase();
        let colored = match record.sentiment.to_lowercase().as_str() {
            "positive" => self.paint(GREEN, &sentiment),
            "negative" => self.paint(RED, &sentiment),
            _ => self.paint(CYAN, &sentiment),
        };

        let mut line = format!("Sentiment: {}", self.paint(BOLD, &colored));
        if let Some(connection) = connection {
            line.push(' ');
            line.push_str(&self.paint(DIM, &format!("(via {})", connection.endpoint.role.label())));
        }
        line
    }

    /// Formats the probe table produced by a resolution pass.
    pub fn format_probes(&self, probes: &[ProbeResult]) -> String {
        let mut lines = Vec::with_capacity(probes.len());
        for probe in probes {
            let scheme = probe
                .reachable_scheme
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            let outcome = match &probe.error {
                None => self.paint(GREEN, &format!("✓ reachable ({}ms)", probe.latency_ms)),
                Some(error) if probe.mixed_content => {
                    self.paint(YELLOW, &format!("✗ {error}"))
                }
                Some(error) => self.paint(RED, &format!("✗ {error}")),
            };
            lines.push(format!(
                "{:<50} {:<6} {}",
                probe.endpoint.base_url, scheme, outcome
            ));
        }
        lines.join("\n")
    }

    /// Formats the connectivity status, with the active endpoint if any.
    pub fn format_status(
        &self,
        status: &StatusSnapshot,
        connection: Option<&ActiveConnection>,
    ) -> String {
        let label = match status.status {
            ApiStatus::Ready => self.paint(GREEN, status.status.label()),
            ApiStatus::Fallback => self.paint(YELLOW, status.status.label()),
            ApiStatus::Error => self.paint(RED, status.status.label()),
            ApiStatus::Unknown => self.paint(DIM, status.status.label()),
        };

        let mut lines = vec![format!("Status: {label}")];
        if let Some(message) = &status.message {
            lines.push(format!("  {message}"));
        }
        if let Some(connection) = connection {
            lines.push(format!(
                "  Using: {} ({})",
                connection.endpoint.role.label(),
                connection.base_url()
            ));
        }
        lines.join("\n")
    }

    /// Formats the analysis history, oldest first.
    pub fn format_history(&self, records: &[AnalysisRecord]) -> String {
        if records.is_empty() {
            return self.paint(DIM, "No analyses yet").to_string();
        }

        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            let when = record
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M");
            lines.push(format!(
                "{}  {:<10} {}",
                self.paint(DIM, &when.to_string()),
                record.sentiment,
                record.text
            ));
        }
        lines.join("\n")
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
