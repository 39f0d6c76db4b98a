use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A weather submission as it arrived from the ingestion form, before cleaning.
///
/// Field names mirror the raw store's columns. `description` and `image_url`
/// are genuinely optional; `None` means absent, never empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Assigned by the store on insert.
    pub id: Option<Uuid>,
    pub name: String,
    pub city: String,
    /// Free-form weather condition label ("Sunny", "rain", ...).
    pub condition: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set once the record has gone through a successful pipeline run.
    #[serde(default)]
    pub processed: bool,
}

/// A raw record that passed validation and normalization.
///
/// No identifier here: the destination store assigns its own on append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub name: String,
    pub city: String,
    pub condition: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Summary of one complete extract-transform-load-archive cycle.
///
/// Serialized as-is into the per-run JSON log entry. On a successful run
/// `records_read == records_rejected + records_stored`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub records_read: usize,
    pub records_rejected: usize,
    pub records_stored: usize,
    pub raw_snapshot: Option<String>,
    pub clean_snapshot: Option<String>,
}

impl RunSummary {
    /// The "nothing to do" fast path: no snapshots, no log entry.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            records_read: 0,
            records_rejected: 0,
            records_stored: 0,
            raw_snapshot: None,
            clean_snapshot: None,
        }
    }
}
