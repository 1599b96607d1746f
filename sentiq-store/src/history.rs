//! Analysis history tracking.
//!
//! An append-only log of completed analyses, persisted as a single JSON
//! array that is consumed and rewritten wholesale. Persistence is
//! best-effort: a load failure degrades to an empty history and a save
//! failure never blocks the in-memory append.

use sentiq_core::AnalysisRecord;
use std::path::Path;
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{load_json_or_default, save_json};

/// Append-only log of completed analyses.
///
/// Entries are kept in insertion order, which the controller guarantees is
/// request-completion order. No deduplication, no capacity bound.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<AnalysisRecord>,
}

impl HistoryStore {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores history from durable storage.
    ///
    /// A missing or unreadable file yields an empty history rather than
    /// failing startup.
    pub async fn load(path: &Path) -> Self {
        let records: Vec<AnalysisRecord> = load_json_or_default(path).await;
        debug!(count = records.len(), "History loaded");
        Self { records }
    }

    /// Appends a completed analysis.
    pub fn append(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    /// Returns all records in insertion order.
    pub fn all(&self) -> &[AnalysisRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no analyses have completed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrites the durable file wholesale.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, &self.records).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut history = HistoryStore::new();
        history.append(AnalysisRecord::new("first", "positive"));
        history.append(AnalysisRecord::new("second", "negative"));

        let texts: Vec<&str> = history.all().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let history = HistoryStore::load(&temp_dir.path().join("absent.json")).await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");
        tokio::fs::write(&path, "[{broken").await.unwrap();

        let history = HistoryStore::load(&path).await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip_preserves_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");

        let mut history = HistoryStore::new();
        for i in 0..5 {
            history.append(AnalysisRecord::new(format!("text {i}"), "positive"));
        }
        history.save(&path).await.unwrap();

        let restored = HistoryStore::load(&path).await;
        assert_eq!(restored.all(), history.all());
    }
}
