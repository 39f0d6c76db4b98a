use crate::error::Result;
use crate::storage::RawSource;
use crate::types::RawRecord;
use tracing::info;

/// Reads all pending raw records from the source, in store-defined order.
///
/// An empty store is not an error; `StoreUnavailable` surfaces unchanged from
/// the source and is never retried here.
pub async fn extract(source: &dyn RawSource) -> Result<Vec<RawRecord>> {
    let records = source.list_pending().await?;
    info!("Extracted {} pending raw records", records.len());
    Ok(records)
}
