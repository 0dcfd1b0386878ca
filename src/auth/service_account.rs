//! Service account key loading and the JWT bearer token exchange

use crate::auth::AccessToken;
use crate::error::{Error, Result};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a Google service account key file we use
#[derive(Deserialize)]
pub struct ServiceAccountKey {
    /// Account identity, used as the JWT issuer
    pub client_email: String,
    /// Key id, sent as the JWT `kid`
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(deserialize_with = "deserialize_secret")]
    private_key: SecretString,
    /// OAuth token endpoint
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Read a service account key file
///
/// A missing file is reported as [`Error::InputNotFound`].
pub fn load_service_account_key(path: &Path) -> Result<ServiceAccountKey> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            what: "service account file",
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    let key: ServiceAccountKey = serde_json::from_str(&raw)?;

    if key.private_key.expose_secret().trim().is_empty() {
        return Err(Error::Config(format!(
            "service account file {} has an empty private_key",
            path.display()
        )));
    }

    Ok(key)
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl ServiceAccountKey {
    fn signed_assertion(&self, scope: &str, now: i64) -> Result<String> {
        let claims = Claims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);
        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())?;

        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}

/// Exchange a signed assertion for an access token at the key's `token_uri`
pub async fn exchange_service_account_token(
    client: &Client,
    key: &ServiceAccountKey,
    scope: &str,
) -> Result<AccessToken> {
    let now = Utc::now();
    let assertion = key.signed_assertion(scope, now.timestamp())?;

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!(
            "token exchange for {} failed ({status}): {body}",
            key.client_email
        )));
    }

    let token: TokenResponse = response.json().await?;

    // An out-of-range lifetime leaves the expiry unknown
    let expires_at = token.expires_in.and_then(|secs| {
        let at = TimeDelta::try_seconds(secs).and_then(|d| now.checked_add_signed(d));
        if at.is_none() {
            warn!(expires_in = secs, "ignoring out-of-range token lifetime");
        }
        at
    });

    Ok(AccessToken {
        token: SecretString::from(token.access_token),
        expires_at,
    })
}
