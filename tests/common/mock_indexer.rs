//! Mock indexing service for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use bulk_indexer::error::{Error, Result};
use bulk_indexer::indexing::IndexingService;
use bulk_indexer::types::{NotificationMetadata, SubmissionItem};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Simple mock indexing service
///
/// Features:
/// - Call tracking in submission order
/// - API error injection by URL, by call number, or for every call
/// - Internal (non-HTTP) error injection by URL
/// - Configurable metadata responses
pub struct MockIndexingService {
    publish_calls: Mutex<Vec<SubmissionItem>>,
    metadata_calls: Mutex<Vec<String>>,
    metadata_responses: Mutex<HashMap<String, NotificationMetadata>>,
    // Error injection
    fail_urls: Mutex<HashSet<String>>,
    fail_calls: Mutex<HashSet<usize>>,
    fail_all: Mutex<Option<String>>,
    internal_urls: Mutex<HashSet<String>>,
}

impl MockIndexingService {
    /// Create a mock that accepts everything
    pub fn new() -> Self {
        Self {
            publish_calls: Mutex::new(Vec::new()),
            metadata_calls: Mutex::new(Vec::new()),
            metadata_responses: Mutex::new(HashMap::new()),
            fail_urls: Mutex::new(HashSet::new()),
            fail_calls: Mutex::new(HashSet::new()),
            fail_all: Mutex::new(None),
            internal_urls: Mutex::new(HashSet::new()),
        }
    }

    // === Error injection methods ===

    /// Make `publish` fail for a specific URL
    pub fn fail_url(&self, url: &str) {
        self.fail_urls.lock().unwrap().insert(url.to_string());
    }

    /// Make the nth `publish` call fail (0-based)
    pub fn fail_call(&self, n: usize) {
        self.fail_calls.lock().unwrap().insert(n);
    }

    /// Make every `publish` call fail with `msg`
    pub fn fail_all(&self, msg: &str) {
        *self.fail_all.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `publish` fail for `url` with an error that is not an HTTP failure
    pub fn fail_internal(&self, url: &str) {
        self.internal_urls.lock().unwrap().insert(url.to_string());
    }

    /// Set the response for `metadata` for a URL
    pub fn set_metadata(&self, meta: NotificationMetadata) {
        self.metadata_responses
            .lock()
            .unwrap()
            .insert(meta.url.clone(), meta);
    }

    // === Call verification methods ===

    /// All items `publish` was called with, in call order
    pub fn published(&self) -> Vec<SubmissionItem> {
        self.publish_calls.lock().unwrap().clone()
    }

    /// URLs `publish` was called with, in call order
    pub fn published_urls(&self) -> Vec<String> {
        self.published().into_iter().map(|i| i.url).collect()
    }

    /// Number of `publish` calls
    pub fn publish_count(&self) -> usize {
        self.publish_calls.lock().unwrap().len()
    }

    /// URLs `metadata` was called with
    pub fn metadata_calls(&self) -> Vec<String> {
        self.metadata_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexingService for MockIndexingService {
    async fn publish(&self, item: &SubmissionItem) -> Result<()> {
        let call = {
            let mut calls = self.publish_calls.lock().unwrap();
            calls.push(item.clone());
            calls.len() - 1
        };

        if self.internal_urls.lock().unwrap().contains(&item.url) {
            return Err(Error::Internal(format!("request for {} could not be built", item.url)));
        }
        if let Some(msg) = self.fail_all.lock().unwrap().as_ref() {
            return Err(Error::IndexingApi {
                status: 503,
                message: msg.clone(),
            });
        }
        if self.fail_calls.lock().unwrap().contains(&call)
            || self.fail_urls.lock().unwrap().contains(&item.url)
        {
            return Err(Error::IndexingApi {
                status: 500,
                message: format!("injected failure for {}", item.url),
            });
        }

        Ok(())
    }

    async fn metadata(&self, url: &str) -> Result<NotificationMetadata> {
        self.metadata_calls.lock().unwrap().push(url.to_string());
        self.metadata_responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::IndexingApi {
                status: 404,
                message: "Requested entity was not found.".to_string(),
            })
    }

    fn endpoint(&self) -> &str {
        "mock://indexing"
    }
}
