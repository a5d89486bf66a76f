//! Loaded dataset snapshots.

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An immutable, fingerprinted set of records from one source.
///
/// Shared by `Arc` between the API and in-flight requests; a newer load
/// replaces the active snapshot instead of mutating this one.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source_id: String,
    pub headers: Vec<String>,
    pub records: Arc<[Record]>,
    /// blake3 hex digest of headers and records.
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            source_id: self.source_id.clone(),
            record_count: self.records.len(),
            columns: self.headers.clone(),
            fingerprint: self.fingerprint.clone(),
            loaded_at: self.loaded_at.to_rfc3339(),
        }
    }
}

/// Dataset description returned to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub source_id: String,
    pub record_count: usize,
    pub columns: Vec<String>,
    pub fingerprint: String,
    pub loaded_at: String,
}
