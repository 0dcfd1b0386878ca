//! Authentication for the Google Indexing API
//!
//! Supports service account keys, a raw token in the environment, and the
//! gcloud CLI.

mod gcloud;
mod service_account;

pub use gcloud::get_gcloud_token;
pub use service_account::{
    ServiceAccountKey, exchange_service_account_token, load_service_account_key,
};

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// OAuth scope required by the Indexing API
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

/// Environment variable holding a ready-made bearer token
pub const TOKEN_ENV_VAR: &str = "GOOGLE_INDEXING_TOKEN";

/// Environment variable pointing at a service account key
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// File name looked up in the working and config directories
pub const DEFAULT_KEY_FILE: &str = "service_account.json";

/// Google's token introspection endpoint
pub const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Source of authentication token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// Token minted from a service account key file
    ServiceAccount(PathBuf),
    /// Token from environment variable
    EnvVar,
    /// Token from `gcloud auth print-access-token`
    Cli,
}

/// Resolved Google credentials
#[derive(Debug)]
pub struct GoogleAuthConfig {
    /// Bearer token
    pub token: SecretString,
    /// Where the token was obtained from
    pub source: AuthSource,
    /// Service account email, when known
    pub identity: Option<String>,
    /// Token expiry, when known
    pub expires_at: Option<DateTime<Utc>>,
}

/// Get Google authentication
///
/// Priority:
/// 1. `explicit_key` (must exist)
/// 2. `GOOGLE_INDEXING_TOKEN` environment variable
/// 3. `GOOGLE_APPLICATION_CREDENTIALS` environment variable (must exist)
/// 4. `service_account.json` in the working directory, then the config dir
/// 5. gcloud CLI
pub async fn get_google_auth(explicit_key: Option<&Path>) -> Result<GoogleAuthConfig> {
    if let Some(path) = explicit_key {
        return from_key_file(path).await;
    }

    if let Ok(token) = env::var(TOKEN_ENV_VAR) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            debug!("using token from {TOKEN_ENV_VAR}");
            return Ok(GoogleAuthConfig {
                token: SecretString::from(token),
                source: AuthSource::EnvVar,
                identity: None,
                expires_at: None,
            });
        }
    }

    if let Ok(path) = env::var(CREDENTIALS_ENV_VAR) {
        if !path.trim().is_empty() {
            return from_key_file(Path::new(&path)).await;
        }
    }

    if let Some(path) = default_key_paths().into_iter().find(|p| p.is_file()) {
        return from_key_file(&path).await;
    }

    if let Some(token) = get_gcloud_token().await {
        return Ok(GoogleAuthConfig {
            token: SecretString::from(token),
            source: AuthSource::Cli,
            identity: None,
            expires_at: None,
        });
    }

    Err(Error::Auth(format!(
        "No Google credentials found. Pass --credentials, set {CREDENTIALS_ENV_VAR} or \
         {TOKEN_ENV_VAR}, or run `gcloud auth login`"
    )))
}

/// Candidate locations for an implicit key file
pub fn default_key_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_KEY_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("bulk-indexer").join(DEFAULT_KEY_FILE));
    }
    paths
}

async fn from_key_file(path: &Path) -> Result<GoogleAuthConfig> {
    let key = load_service_account_key(path)?;
    debug!(path = %path.display(), email = %key.client_email, "exchanging service account key");

    let token = exchange_service_account_token(&auth_client()?, &key, INDEXING_SCOPE).await?;

    Ok(GoogleAuthConfig {
        token: token.token,
        source: AuthSource::ServiceAccount(path.to_path_buf()),
        identity: Some(key.client_email),
        expires_at: token.expires_at,
    })
}

fn auth_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

/// Access token returned by an OAuth token endpoint
#[derive(Debug)]
pub struct AccessToken {
    /// Bearer token
    pub token: SecretString,
    /// Expiry computed from `expires_in`
    pub expires_at: Option<DateTime<Utc>>,
}

/// Token introspection result
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    /// Space-separated granted scopes
    #[serde(default)]
    pub scope: String,
    /// Account the token belongs to, if disclosed
    #[serde(default)]
    pub email: Option<String>,
    /// Seconds until expiry (Google returns this as a string)
    #[serde(default)]
    pub expires_in: Option<String>,
}

impl TokenInfo {
    /// Whether the token carries the indexing scope
    pub fn has_indexing_scope(&self) -> bool {
        self.scope.split_whitespace().any(|s| s == INDEXING_SCOPE)
    }
}

/// Test Google authentication
///
/// Introspects the token and checks it can publish to the Indexing API.
pub async fn test_google_auth(config: &GoogleAuthConfig, tokeninfo_url: &str) -> Result<TokenInfo> {
    let info: TokenInfo = auth_client()?
        .get(tokeninfo_url)
        .query(&[("access_token", config.token.expose_secret())])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?
        .json()
        .await?;

    if !info.has_indexing_scope() {
        return Err(Error::Auth(format!(
            "token lacks the {INDEXING_SCOPE} scope (granted: {})",
            if info.scope.is_empty() { "none" } else { info.scope.as_str() }
        )));
    }

    Ok(info)
}
