//! sheet-ticker: batch updater for crypto prices in a Google spreadsheet
//!
//! This library provides the core components for:
//! - TOML configuration co-located with the executable
//! - OAuth2 installed-app auth with a cached token
//! - Google Sheets v4 values API client (read + batch update)
//! - CoinMarketCap-style full-universe ticker snapshot
//! - Symbol-to-row resolution preserving spreadsheet order
//! - Two-range batch payload assembly (timestamp + price rows)
//! - Structured logging

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod market;
pub mod resolve;
pub mod sheets;
pub mod telemetry;
pub mod update;
