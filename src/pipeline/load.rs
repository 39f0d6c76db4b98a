use crate::error::{EtlError, Result};
use crate::storage::CleanSink;
use crate::types::CleanRecord;
use metrics::counter;
use tracing::{error, info};

/// Appends each cleaned record to the destination store as an independent
/// insert and returns how many went in.
///
/// The first failed insert aborts the whole call with `LoadFailed` carrying
/// the count committed so far. Nothing is rolled back and nothing after the
/// failure is attempted; retrying means re-running the whole batch.
pub async fn load(sink: &dyn CleanSink, records: &[CleanRecord]) -> Result<usize> {
    let mut stored = 0usize;

    for record in records {
        if let Err(e) = sink.append(record).await {
            error!("Insert failed after {} records: {}", stored, e);
            counter!("etl_load_failures_total").increment(1);
            return Err(EtlError::LoadFailed {
                stored,
                message: e.to_string(),
            });
        }
        stored += 1;
    }

    info!("Loaded {} clean records into destination store", stored);
    counter!("etl_records_stored_total").increment(stored as u64);
    Ok(stored)
}
