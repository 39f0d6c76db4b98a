use crate::error::{EtlError, Result};
use crate::types::{CleanRecord, RawRecord, RunSummary};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the per-run audit trail: one CSV snapshot of each dataset plus a
/// JSON run log, all named after the run timestamp.
///
/// Archiving is best-effort bookkeeping. Callers report a failure here but
/// never use it to revert loaded data.
pub struct Archiver {
    backup_dir: PathBuf,
}

impl Archiver {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Snapshots both datasets of the current run, returning the two paths.
    /// Names are unique per run at one-second timestamp granularity.
    pub fn archive(
        &self,
        raw_records: &[RawRecord],
        clean_records: &[CleanRecord],
        run_timestamp: DateTime<Utc>,
    ) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| EtlError::ArchiveFailed(e.to_string()))?;
        let stamp = run_timestamp.format("%Y%m%d_%H%M%S");

        let raw_path = self.backup_dir.join(format!("raw_{stamp}.csv"));
        write_csv(&raw_path, raw_records)
            .map_err(|e| EtlError::ArchiveFailed(format!("raw snapshot: {e}")))?;

        let clean_path = self.backup_dir.join(format!("cleaned_{stamp}.csv"));
        write_csv(&clean_path, clean_records)
            .map_err(|e| EtlError::ArchiveFailed(format!("clean snapshot: {e}")))?;

        info!(
            "Archived {} raw and {} clean records to {}",
            raw_records.len(),
            clean_records.len(),
            self.backup_dir.display()
        );
        Ok((raw_path, clean_path))
    }

    /// Persists the run summary as a structured JSON log entry alongside the
    /// snapshots.
    pub fn write_run_log(&self, summary: &RunSummary) -> Result<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| EtlError::ArchiveFailed(e.to_string()))?;
        let stamp = summary.timestamp.format("%Y%m%d_%H%M%S");
        let log_path = self.backup_dir.join(format!("log_{stamp}.json"));

        let json_content = serde_json::to_string_pretty(summary)
            .map_err(|e| EtlError::ArchiveFailed(format!("run log: {e}")))?;
        fs::write(&log_path, json_content)
            .map_err(|e| EtlError::ArchiveFailed(format!("run log: {e}")))?;

        info!("Wrote run log to {}", log_path.display());
        Ok(log_path)
    }
}

fn write_csv<T: serde::Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
