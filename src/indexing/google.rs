//! Google Indexing API client

use crate::error::{Error, Result};
use crate::indexing::IndexingService;
use crate::types::{NotificationMetadata, SubmissionItem};
use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Production Indexing API host
pub const DEFAULT_ENDPOINT: &str = "https://indexing.googleapis.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Google Indexing API service using reqwest
pub struct GoogleIndexingService {
    client: Client,
    token: SecretString,
    endpoint: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl GoogleIndexingService {
    /// Create a new service
    pub fn new(token: SecretString, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v3{}", self.endpoint, path)
    }

    /// Turn a non-success response into [`Error::IndexingApi`]
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        Err(Error::IndexingApi {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl IndexingService for GoogleIndexingService {
    async fn publish(&self, item: &SubmissionItem) -> Result<()> {
        let url = self.api_url("/urlNotifications:publish");
        debug!(url = %item.url, kind = %item.kind, "publishing");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(item)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn metadata(&self, url: &str) -> Result<NotificationMetadata> {
        let endpoint = self.api_url("/urlNotifications/metadata");

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(self.token.expose_secret())
            .query(&[("url", url)])
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
