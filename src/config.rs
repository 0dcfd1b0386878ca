//! Run configuration
//!
//! Values arrive from CLI flags or `BULK_INDEXER_*` environment variables and
//! are validated here before any file or network I/O happens.

use crate::error::{Error, Result};
use crate::types::NotificationKind;
use url::Url;

/// Default daily publish quota of a Google Cloud project
pub const DEFAULT_QUOTA: usize = 200;

/// Default number of failures tolerated before a run is aborted
pub const DEFAULT_FAILURE_LIMIT: usize = 5;

/// Default CSV column holding page slugs
pub const DEFAULT_SLUG_COLUMN: &str = "slug";

/// Ceilings for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitLimits {
    /// Maximum submission attempts
    pub quota: usize,
    /// Failures tolerated; the run aborts once `failed > failure_limit`
    pub failure_limit: usize,
}

impl Default for SubmitLimits {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            failure_limit: DEFAULT_FAILURE_LIMIT,
        }
    }
}

impl SubmitLimits {
    /// Build validated limits
    pub fn new(quota: usize, failure_limit: usize) -> Result<Self> {
        if quota == 0 {
            return Err(Error::Config("quota must be at least 1".to_string()));
        }
        Ok(Self {
            quota,
            failure_limit,
        })
    }
}

/// How items are derived from an input file
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Site the slugs belong to
    pub site_url: Url,
    /// CSV column holding slugs
    pub slug_column: String,
    /// Paths submitted ahead of the file contents, in order
    pub leading_paths: Vec<String>,
    /// Notification kind for every item
    pub kind: NotificationKind,
}

impl SourceConfig {
    /// Parse and validate the site URL
    pub fn new(site_url: &str) -> Result<Self> {
        let parsed = Url::parse(site_url).map_err(|e| Error::InvalidUrl {
            url: site_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "site URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(Error::Config(format!("site URL '{site_url}' has no host")));
        }

        Ok(Self {
            site_url: parsed,
            slug_column: DEFAULT_SLUG_COLUMN.to_string(),
            leading_paths: Vec::new(),
            kind: NotificationKind::Updated,
        })
    }

    /// Set the slug column
    #[must_use]
    pub fn with_slug_column(mut self, column: impl Into<String>) -> Self {
        self.slug_column = column.into();
        self
    }

    /// Set the leading paths
    #[must_use]
    pub fn with_leading_paths(mut self, paths: Vec<String>) -> Self {
        self.leading_paths = paths;
        self
    }

    /// Set the notification kind
    #[must_use]
    pub const fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Join a slug or path onto the site URL.
    ///
    /// `""` and `"/"` yield the site URL itself, without a trailing slash.
    pub fn page_url(&self, path: &str) -> String {
        let base = self.site_url.as_str().trim_end_matches('/');
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}
