//! Completed analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed sentiment classification.
///
/// Created on every successful request and appended to the history log.
/// Immutable; never mutated or deleted by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// The text that was analyzed.
    pub text: String,
    /// The sentiment label the backend reported. Open-ended; the backend is
    /// the source of truth for allowed values.
    pub sentiment: String,
    /// When the request completed.
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Creates a record stamped with the current time.
    pub fn new(text: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentiment: sentiment.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trips_through_json() {
        let record = AnalysisRecord::new("great product", "positive");
        let json = serde_json::to_string(&record).unwrap();
        let back: AnalysisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
