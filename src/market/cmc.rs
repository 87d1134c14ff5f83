//! CoinMarketCap ticker client
//!
//! Pulls the full public ticker listing in one call. Quote values stay
//! strings end to end; entries missing any USD quote field are dropped
//! before they reach the resolver.

use super::{TickerEntry, TickerSource};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// CoinMarketCap public API base URL
pub const CMC_API_URL: &str = "https://api.coinmarketcap.com";

/// Configuration for the ticker client
#[derive(Debug, Clone)]
pub struct CmcConfig {
    /// Base URL for the ticker API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Entries to request; 0 requests the full universe
    pub limit: u32,
}

impl Default for CmcConfig {
    fn default() -> Self {
        Self {
            base_url: CMC_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            limit: 0,
        }
    }
}

/// Client for the public ticker endpoint
pub struct CmcClient {
    config: CmcConfig,
    client: Client,
}

/// Raw ticker record from the API
#[derive(Debug, Deserialize)]
struct CmcTicker {
    symbol: String,
    price_usd: Option<String>,
    market_cap_usd: Option<String>,
    percent_change_24h: Option<String>,
}

impl CmcClient {
    /// Create a new ticker client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(CmcConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: CmcConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn ticker_url(&self) -> String {
        format!("{}/v1/ticker/", self.config.base_url)
    }

    /// Convert a raw ticker into a complete entry, or None when any
    /// quote field is absent
    fn convert_ticker(raw: CmcTicker) -> Option<TickerEntry> {
        let price_usd = raw.price_usd?;
        let market_cap_usd = raw.market_cap_usd?;
        let percent_change_24h = raw.percent_change_24h?;

        Some(TickerEntry {
            symbol: raw.symbol,
            price_usd,
            market_cap_usd,
            percent_change_24h,
        })
    }
}

#[async_trait]
impl TickerSource for CmcClient {
    async fn ticker_snapshot(&self) -> anyhow::Result<Vec<TickerEntry>> {
        let url = self.ticker_url();

        tracing::debug!(url = %url, limit = self.config.limit, "Fetching ticker snapshot");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.config.limit)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ticker API error: {} - {}", status, body);
        }

        let raw: Vec<CmcTicker> = response.json().await?;
        let total = raw.len();

        let entries: Vec<TickerEntry> = raw
            .into_iter()
            .filter_map(|t| {
                let symbol = t.symbol.clone();
                let entry = Self::convert_ticker(t);
                if entry.is_none() {
                    tracing::debug!(symbol = %symbol, "Dropping ticker with incomplete USD quote");
                }
                entry
            })
            .collect();

        tracing::info!(
            entries = entries.len(),
            dropped = total - entries.len(),
            "Fetched ticker snapshot"
        );

        Ok(entries)
    }
}
