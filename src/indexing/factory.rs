//! Indexing service factory

use crate::auth::GoogleAuthConfig;
use crate::error::Result;
use crate::indexing::{GoogleIndexingService, IndexingService};
use std::time::Duration;

/// Create the indexing service for resolved credentials
pub fn create_indexing_service(
    auth: GoogleAuthConfig,
    endpoint: &str,
    timeout: Duration,
) -> Result<Box<dyn IndexingService>> {
    Ok(Box::new(GoogleIndexingService::new(
        auth.token, endpoint, timeout,
    )?))
}
