use crate::error::Result;
use crate::types::{CleanRecord, RawRecord};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Source of raw weather submissions awaiting cleaning.
///
/// The ingestion endpoint writes to this store concurrently; the pipeline only
/// reads and flips the processed flag, it never deletes or rewrites records.
#[async_trait]
pub trait RawSource: Send + Sync {
    /// Inserts a new submission, assigning its identifier.
    async fn insert(&self, record: &mut RawRecord) -> Result<()>;

    /// Lists all records that have not been through a successful run yet.
    async fn list_pending(&self) -> Result<Vec<RawRecord>>;

    /// Marks records as consumed so re-runs do not reload them.
    async fn mark_processed(&self, ids: &[Uuid]) -> Result<()>;
}

/// Destination store for cleaned records. Append-only from the pipeline's
/// point of view; identifiers are assigned by the sink.
#[async_trait]
pub trait CleanSink: Send + Sync {
    async fn append(&self, record: &CleanRecord) -> Result<()>;
}

/// In-memory raw store for development/testing.
#[derive(Default)]
pub struct InMemoryRawSource {
    records: Arc<Mutex<Vec<RawRecord>>>,
}

impl InMemoryRawSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RawSource for InMemoryRawSource {
    async fn insert(&self, record: &mut RawRecord) -> Result<()> {
        let id = Uuid::new_v4();
        record.id = Some(id);

        let mut records = self.records.lock().unwrap();
        records.push(record.clone());

        debug!("Inserted raw record from {} with id {}", record.name, id);
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<RawRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| !r.processed).cloned().collect())
    }

    async fn mark_processed(&self, ids: &[Uuid]) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if let Some(id) = record.id {
                if ids.contains(&id) {
                    record.processed = true;
                    debug!("Marked raw record {} as processed", id);
                }
            }
        }
        Ok(())
    }
}

/// In-memory clean store for development/testing.
#[derive(Default)]
pub struct InMemoryCleanSink {
    records: Arc<Mutex<Vec<CleanRecord>>>,
}

impl InMemoryCleanSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far.
    pub fn records(&self) -> Vec<CleanRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CleanSink for InMemoryCleanSink {
    async fn append(&self, record: &CleanRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        debug!("Appended clean record for {}", record.city);
        Ok(())
    }
}
