//! Installed-app OAuth2 flow against the endpoints named in the
//! client secret file
//!
//! Token acquisition order: cached access token if still fresh, then a
//! refresh grant when a refresh token is cached, then the interactive
//! consent flow (print the authorization URL, read the code from stdin).

use super::{default_token_cache_path, ClientSecretFile, InstalledAppSecret, StoredToken};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Access scope requested during consent
pub const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Out-of-band redirect: the consent page displays the code for the user
/// to paste back
const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Configuration for the authenticator
#[derive(Debug, Clone)]
pub struct AuthenticatorConfig {
    /// Path to the Google installed-app client secret JSON
    pub client_secret_path: PathBuf,
    /// Token cache location; `None` uses the home-directory default
    pub token_cache_path: Option<PathBuf>,
}

/// Supplies a valid access token for one run
pub struct Authenticator {
    config: AuthenticatorConfig,
    client: Client,
}

/// Token endpoint response for both the code exchange and refresh grants
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds from now
    expires_in: i64,
    /// Only returned by the initial code exchange
    refresh_token: Option<String>,
    token_type: String,
}

impl TokenResponse {
    fn into_stored(self, now: DateTime<Utc>) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            expires_at: now + Duration::seconds(self.expires_in),
        }
    }
}

impl Authenticator {
    pub fn new(config: AuthenticatorConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { config, client })
    }

    /// Obtain a valid access token, consulting the cache first
    pub async fn access_token(&self) -> anyhow::Result<String> {
        let cache_path = self.token_cache_path()?;
        let cached = load_cached_token(&cache_path)?;

        if let Some(token) = &cached {
            if !token.is_expired_at(Utc::now()) {
                tracing::debug!(cache = %cache_path.display(), "Reusing cached access token");
                return Ok(token.access_token.clone());
            }
        }

        let secret = self.load_client_secret()?;

        if let Some(refresh_token) = cached.as_ref().and_then(|t| t.refresh_token.clone()) {
            tracing::info!("Cached token expired; refreshing");
            let mut token = self.refresh(&secret, &refresh_token).await?;
            // Refresh responses omit the refresh token; keep the granted one
            token.refresh_token.get_or_insert(refresh_token);
            persist_token(&cache_path, &token)?;
            return Ok(token.access_token);
        }

        tracing::info!("No usable cached token; starting interactive consent flow");
        let token = self.interactive_consent(&secret).await?;
        persist_token(&cache_path, &token)?;
        tracing::info!(cache = %cache_path.display(), "Stored credentials");
        Ok(token.access_token)
    }

    fn token_cache_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config.token_cache_path {
            Some(path) => Ok(path.clone()),
            None => default_token_cache_path(),
        }
    }

    fn load_client_secret(&self) -> anyhow::Result<InstalledAppSecret> {
        let path = &self.config.client_secret_path;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read client secret {}", path.display()))?;
        let file: ClientSecretFile = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse client secret {}", path.display()))?;
        Ok(file.installed)
    }

    /// Exchange a refresh token for a fresh access token
    async fn refresh(
        &self,
        secret: &InstalledAppSecret,
        refresh_token: &str,
    ) -> anyhow::Result<StoredToken> {
        let params = [
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self.request_token(&secret.token_uri, &params).await?;
        Ok(response.into_stored(Utc::now()))
    }

    /// Run the one-time consent flow: print the authorization URL and
    /// exchange the code the user pastes back
    async fn interactive_consent(
        &self,
        secret: &InstalledAppSecret,
    ) -> anyhow::Result<StoredToken> {
        let auth_url = build_auth_url(secret)?;

        println!("Open this URL in your browser and authorize access:");
        println!("\n  {}\n", auth_url);
        print!("Paste the authorization code here: ");
        std::io::stdout().flush()?;

        let mut code = String::new();
        std::io::stdin()
            .read_line(&mut code)
            .context("failed to read authorization code from stdin")?;
        let code = code.trim();
        if code.is_empty() {
            anyhow::bail!("empty authorization code");
        }

        let params = [
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ];

        let response = self.request_token(&secret.token_uri, &params).await?;
        Ok(response.into_stored(Utc::now()))
    }

    async fn request_token(
        &self,
        token_uri: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<TokenResponse> {
        let response = self.client.post(token_uri).form(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Token endpoint error: {} - {}", status, body);
        }

        Ok(response.json().await?)
    }
}

/// Build the consent URL the user opens in a browser
fn build_auth_url(secret: &InstalledAppSecret) -> anyhow::Result<reqwest::Url> {
    let url = reqwest::Url::parse_with_params(
        &secret.auth_uri,
        &[
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("scope", OAUTH_SCOPE),
            // Ask for a refresh token so later runs stay non-interactive
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .with_context(|| format!("invalid auth_uri {}", secret.auth_uri))?;
    Ok(url)
}

/// Read the cached token if the cache file exists
fn load_cached_token(path: &Path) -> anyhow::Result<Option<StoredToken>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read token cache {}", path.display()))?;
    let token = serde_json::from_str(&content)
        .with_context(|| format!("cannot parse token cache {}", path.display()))?;
    Ok(Some(token))
}

/// Write the token cache, creating the credentials directory on first use
fn persist_token(path: &Path, token: &StoredToken) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create credential dir {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(token)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write token cache {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> InstalledAppSecret {
        InstalledAppSecret {
            client_id: "id123".to_string(),
            client_secret: "secret456".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn test_build_auth_url() {
        let url = build_auth_url(&test_secret()).unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert!(query.contains(&("client_id".to_string(), "id123".to_string())));
        assert!(query.contains(&("scope".to_string(), OAUTH_SCOPE.to_string())));
        assert!(query.contains(&("redirect_uri".to_string(), REDIRECT_URI.to_string())));
        assert!(query.contains(&("access_type".to_string(), "offline".to_string())));
    }

    #[test]
    fn test_build_auth_url_invalid_uri() {
        let mut secret = test_secret();
        secret.auth_uri = "not a url".to_string();
        assert!(build_auth_url(&secret).is_err());
    }

    #[test]
    fn test_token_response_into_stored() {
        let response = TokenResponse {
            access_token: "access".to_string(),
            expires_in: 3600,
            refresh_token: Some("refresh".to_string()),
            token_type: "Bearer".to_string(),
        };

        let now = Utc::now();
        let stored = response.into_stored(now);
        assert_eq!(stored.access_token, "access");
        assert_eq!(stored.expires_at, now + Duration::seconds(3600));
        assert!(!stored.is_expired_at(now));
    }

    #[test]
    fn test_token_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token.json");

        let token = StoredToken {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_type: "Bearer".to_string(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };

        persist_token(&path, &token).unwrap();
        let loaded = load_cached_token(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn test_load_cached_token_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_cached_token(&dir.path().join("absent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_cached_token_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_cached_token(&path).is_err());
    }
}
