//! Market data module
//!
//! Fetches a snapshot of the current ticker universe from a
//! CoinMarketCap-style endpoint

mod cmc;

pub use cmc::{CmcClient, CmcConfig, CMC_API_URL};

use async_trait::async_trait;

/// One asset's quote at snapshot time
///
/// All quote fields are decimal-valued strings, passed through to the
/// spreadsheet exactly as the provider rendered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerEntry {
    /// Asset ticker symbol (case-sensitive, e.g. "BTC")
    pub symbol: String,
    /// Current price in USD
    pub price_usd: String,
    /// Market capitalization in USD
    pub market_cap_usd: String,
    /// Percent change over the last 24 hours, without a percent sign
    pub percent_change_24h: String,
}

/// Trait for ticker snapshot sources
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch the current ticker universe. Fresh on every call; nothing
    /// is cached between runs.
    async fn ticker_snapshot(&self) -> anyhow::Result<Vec<TickerEntry>>;
}
