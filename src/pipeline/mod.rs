// Batch cleaning pipeline: extract, transform, load, archive

pub mod archive;
pub mod extract;
pub mod load;
pub mod transform;

pub use archive::Archiver;

use crate::config::Config;
use crate::error::Result;
use crate::storage::{CleanSink, RawSource};
use crate::types::RunSummary;
use chrono::Utc;
use metrics::{counter, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Orchestrates one extract-transform-load-archive cycle over the configured
/// stores.
///
/// All triggers, scheduled or on-demand, go through [`Pipeline::try_run_once`]
/// so the single-flight guard is shared: at most one run executes at a time,
/// system-wide.
pub struct Pipeline {
    source: Arc<dyn RawSource>,
    sink: Arc<dyn CleanSink>,
    archiver: Archiver,
    running: AtomicBool,
}

/// Releases the run-in-progress flag on every exit path.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Pipeline {
    pub fn new(config: &Config, source: Arc<dyn RawSource>, sink: Arc<dyn CleanSink>) -> Self {
        Self {
            source,
            sink,
            archiver: Archiver::new(config.backup_dir.clone()),
            running: AtomicBool::new(false),
        }
    }

    /// Attempts one pipeline run. Returns `Ok(None)` without doing anything
    /// when another run is already in flight; the caller decides whether that
    /// is a skipped tick or a rejected trigger.
    pub async fn try_run_once(&self) -> Result<Option<RunSummary>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(None);
        }
        let _guard = RunGuard(&self.running);
        self.run_once().await.map(Some)
    }

    #[instrument(skip(self))]
    async fn run_once(&self) -> Result<RunSummary> {
        let run_timestamp = Utc::now();
        info!("Starting pipeline run");
        counter!("etl_runs_total").increment(1);
        let t_run = std::time::Instant::now();

        // Step 1: extract pending raw records
        let raw_records = extract::extract(self.source.as_ref()).await?;
        if raw_records.is_empty() {
            // Nothing to do: no snapshots, no run log
            info!("Raw store is empty, skipping transform/load/archive");
            return Ok(RunSummary::empty(run_timestamp));
        }

        // Step 2: clean and normalize
        let (clean_records, rejected) = transform::transform(&raw_records);
        info!(
            "Transformed {} records ({} rejected)",
            clean_records.len(),
            rejected
        );
        counter!("etl_records_rejected_total").increment(rejected as u64);

        // Step 3: append to the destination store
        let stored = load::load(self.sink.as_ref(), &clean_records).await?;

        // Step 4: mark the whole extracted batch consumed, rejected records
        // included, so re-runs do not reload them. Skipped on load failure to
        // keep whole-batch retry possible.
        let ids: Vec<Uuid> = raw_records.iter().filter_map(|r| r.id).collect();
        self.source.mark_processed(&ids).await?;

        // Step 5: audit trail. Archive failure is reported but never unwinds
        // data already loaded.
        let (raw_snapshot, clean_snapshot) =
            match self
                .archiver
                .archive(&raw_records, &clean_records, run_timestamp)
            {
                Ok((raw_path, clean_path)) => (
                    Some(raw_path.to_string_lossy().to_string()),
                    Some(clean_path.to_string_lossy().to_string()),
                ),
                Err(e) => {
                    error!("Archive failed, loaded data is intact: {}", e);
                    counter!("etl_archive_failures_total").increment(1);
                    (None, None)
                }
            };

        let summary = RunSummary {
            timestamp: run_timestamp,
            records_read: raw_records.len(),
            records_rejected: rejected,
            records_stored: stored,
            raw_snapshot,
            clean_snapshot,
        };

        if let Err(e) = self.archiver.write_run_log(&summary) {
            error!("Failed to write run log: {}", e);
            counter!("etl_archive_failures_total").increment(1);
        }

        histogram!("etl_run_duration_seconds").record(t_run.elapsed().as_secs_f64());
        info!(
            "Pipeline run finished: read={} rejected={} stored={}",
            summary.records_read, summary.records_rejected, summary.records_stored
        );
        Ok(summary)
    }
}
