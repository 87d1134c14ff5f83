//! OAuth2 credentials for the spreadsheet backend
//!
//! One-time interactive consent, then silent reuse of a token cached
//! under the user's home directory, refreshed when near expiry.
//!
//! The cache file is shared on-disk state: runs are expected one at a
//! time, concurrent invocations race on it without locking.

mod oauth;

pub use oauth::{Authenticator, AuthenticatorConfig, OAUTH_SCOPE};

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cache file name under `~/.credentials`
const TOKEN_CACHE_FILE: &str = "sheets.googleapis.com-token.json";

/// Refresh this long before the recorded expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Google client secret file, installed-application shape
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecretFile {
    pub installed: InstalledAppSecret,
}

/// The fields of the `installed` section a token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledAppSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// A cached OAuth token with its absolute expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    /// Present when the consent flow granted offline access
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Whether the token should be considered stale at `now`, applying
    /// a safety margin so a token never expires mid-run
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// Default token cache location: `~/.credentials/sheets.googleapis.com-token.json`
pub fn default_token_cache_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot locate token cache")?;
    Ok(PathBuf::from(home).join(".credentials").join(TOKEN_CACHE_FILE))
}
