//! Indexing endpoint services
//!
//! The submission loop only sees the [`IndexingService`] trait, so tests can
//! swap in a recording mock for the Google client.

mod factory;
mod google;

pub use factory::create_indexing_service;
pub use google::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, GoogleIndexingService};

use crate::error::Result;
use crate::types::{NotificationMetadata, SubmissionItem};
use async_trait::async_trait;

/// Remote URL-notification endpoint
#[async_trait]
pub trait IndexingService: Send + Sync {
    /// Publish one notification
    async fn publish(&self, item: &SubmissionItem) -> Result<()>;

    /// Fetch the latest notifications recorded for a URL
    async fn metadata(&self, url: &str) -> Result<NotificationMetadata>;

    /// Base URL of the endpoint, for display
    fn endpoint(&self) -> &str;
}
