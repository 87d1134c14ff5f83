//! Batch update assembly and the full read-resolve-write cycle

use crate::config::SpreadsheetConfig;
use crate::error::SyncError;
use crate::market::TickerSource;
use crate::resolve;
use crate::sheets::{Row, SpreadsheetStore, ValueRange};

/// Current local wall-clock time in its default rendering, written to the
/// timestamp cell as-is. No timezone normalization.
pub fn update_timestamp() -> String {
    chrono::Local::now().naive_local().to_string()
}

/// Assemble the two-entry batch payload: the timestamp cell first, then
/// the price rows
pub fn build_batch(
    timestamp: &str,
    time_range: &str,
    price_range: &str,
    rows: Vec<Row>,
) -> Vec<ValueRange> {
    vec![
        ValueRange {
            range: time_range.to_string(),
            values: vec![vec![timestamp.to_string()]],
        },
        ValueRange {
            range: price_range.to_string(),
            values: rows,
        },
    ]
}

/// Read the symbol range, fetch a fresh snapshot, and assemble the batch
/// payload without writing anything
pub async fn prepare_batch(
    store: &dyn SpreadsheetStore,
    market: &dyn TickerSource,
    config: &SpreadsheetConfig,
) -> Result<Vec<ValueRange>, SyncError> {
    let grid = store
        .read_range(&config.crypto_ticker_range_name)
        .await
        .map_err(SyncError::SheetRead)?;
    let symbols = resolve::flatten_cells(grid);
    tracing::info!(symbols = symbols.len(), range = %config.crypto_ticker_range_name, "Read ticker symbols");

    let snapshot = market
        .ticker_snapshot()
        .await
        .map_err(SyncError::TickerFetch)?;

    let rows = resolve::resolve(&symbols, &snapshot);
    if rows.len() < symbols.len() {
        tracing::warn!(
            requested = symbols.len(),
            resolved = rows.len(),
            "Some symbols had no ticker entry; written block will be shorter"
        );
    }

    Ok(build_batch(
        &update_timestamp(),
        &config.update_time_range_name,
        &config.to_write_range_name,
        rows,
    ))
}

/// Run one full update cycle against the configured spreadsheet
///
/// Reads the symbol range, fetches a fresh ticker snapshot, resolves the
/// price rows, and commits both ranges in a single batch write. Returns
/// the number of cells the backend reports as updated. Strictly
/// sequential; a failure at any boundary aborts the run before anything
/// is written.
pub async fn run_cycle(
    store: &dyn SpreadsheetStore,
    market: &dyn TickerSource,
    config: &SpreadsheetConfig,
) -> Result<u64, SyncError> {
    let data = prepare_batch(store, market, config).await?;

    let updated_cells = store
        .batch_write(config.value_input_option, data)
        .await
        .map_err(SyncError::BatchWrite)?;

    tracing::info!(updated_cells, "Batch update applied");
    Ok(updated_cells)
}
