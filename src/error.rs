//! Run-level error taxonomy
//!
//! One variant per external-call boundary so the top level can pick a
//! distinct process exit code and message for each failure kind.

use crate::config::ConfigError;
use thiserror::Error;

/// Fatal errors for a single update run
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration file missing, unreadable, or unparsable
    #[error("configuration error")]
    Config(#[from] ConfigError),
    /// Credential load, consent flow, or token refresh failed
    #[error("authentication failed")]
    Auth(#[source] anyhow::Error),
    /// Reading the symbol range from the spreadsheet failed
    #[error("spreadsheet read failed")]
    SheetRead(#[source] anyhow::Error),
    /// Fetching the ticker snapshot failed
    #[error("ticker snapshot fetch failed")]
    TickerFetch(#[source] anyhow::Error),
    /// The batch update call failed; nothing was written
    #[error("spreadsheet batch write failed")]
    BatchWrite(#[source] anyhow::Error),
}

impl SyncError {
    /// Process exit code for this failure kind. Never zero: a run that
    /// did not complete its write must not look successful to a scheduler.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::Config(_) => 2,
            SyncError::Auth(_) => 3,
            SyncError::SheetRead(_) => 4,
            SyncError::TickerFetch(_) => 5,
            SyncError::BatchWrite(_) => 6,
        }
    }
}
