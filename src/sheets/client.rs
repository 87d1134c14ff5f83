//! Google Sheets v4 values API client
//!
//! Covers the two calls a run makes: a range read and a values
//! batch update against one spreadsheet.

use super::{Row, SpreadsheetStore, ValueInputOption, ValueRange};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sheets API base URL
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// Configuration for the Sheets client
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Base URL for the Sheets API
    pub base_url: String,
    /// Spreadsheet all calls are scoped to
    pub spreadsheet_id: String,
    /// Request timeout
    pub timeout: Duration,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            base_url: SHEETS_API_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for one spreadsheet's values endpoints
pub struct SheetsClient {
    config: SheetsConfig,
    access_token: String,
    client: Client,
}

/// Response body for a values read
#[derive(Debug, Deserialize)]
struct ValuesReadResponse {
    /// Absent when the range holds no data
    #[serde(default)]
    values: Option<Vec<Row>>,
}

/// Request body for values:batchUpdate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateRequest {
    value_input_option: ValueInputOption,
    data: Vec<ValueRange>,
}

/// Response body for values:batchUpdate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    total_updated_cells: Option<u64>,
}

impl SheetsClient {
    /// Create a client holding the access token for this run
    pub fn new(config: SheetsConfig, access_token: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            access_token: access_token.into(),
            client,
        })
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values{}",
            self.config.base_url, self.config.spreadsheet_id, suffix
        )
    }
}

#[async_trait]
impl SpreadsheetStore for SheetsClient {
    async fn read_range(&self, range: &str) -> anyhow::Result<Vec<Row>> {
        let url = self.values_url(&format!("/{}", range));

        tracing::debug!(url = %url, range = %range, "Reading spreadsheet range");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API read error: {} - {}", status, body);
        }

        let read: ValuesReadResponse = response.json().await?;
        Ok(read.values.unwrap_or_default())
    }

    async fn batch_write(
        &self,
        value_input_option: ValueInputOption,
        data: Vec<ValueRange>,
    ) -> anyhow::Result<u64> {
        let url = self.values_url(":batchUpdate");
        let body = BatchUpdateRequest {
            value_input_option,
            data,
        };

        tracing::debug!(url = %url, entries = body.data.len(), "Posting batch update");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API batch update error: {} - {}", status, body);
        }

        let update: BatchUpdateResponse = response.json().await?;
        Ok(update.total_updated_cells.unwrap_or(0))
    }
}
