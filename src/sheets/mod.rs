//! Spreadsheet access module
//!
//! Wire types for the Sheets v4 values API and the store trait the
//! update cycle is written against

mod client;

pub use client::{SheetsClient, SheetsConfig, SHEETS_API_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single written row of cell values
pub type Row = Vec<String>;

/// How the backend interprets written values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Values are stored as-is
    #[serde(rename = "RAW")]
    Raw,
    /// Values are parsed as if typed into the sheet by a user
    #[serde(rename = "USER_ENTERED")]
    UserEntered,
}

/// One range worth of values in a batch update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueRange {
    /// A1 notation or named range
    pub range: String,
    /// Row-major grid of cell values
    pub values: Vec<Row>,
}

/// Trait for spreadsheet read/write implementations
#[async_trait]
pub trait SpreadsheetStore: Send + Sync {
    /// Read a range as a row-major grid of string cells; a range with no
    /// data yields an empty grid
    async fn read_range(&self, range: &str) -> anyhow::Result<Vec<Row>>;

    /// Apply all entries in one batch call and return the updated cell
    /// count. Atomic from the caller's perspective: either every entry
    /// applies or the call fails.
    async fn batch_write(
        &self,
        value_input_option: ValueInputOption,
        data: Vec<ValueRange>,
    ) -> anyhow::Result<u64>;
}
