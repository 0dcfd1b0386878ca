//! Item sources
//!
//! Items are read in full before a run starts. Leading pages from
//! [`SourceConfig::leading_paths`] are placed ahead of the file contents so
//! they are submitted first when quota is scarce.

mod rewrite;
mod slug_csv;
mod url_list;

pub use rewrite::{RewriteSummary, SlugRewrite, rewrite_slugs};
pub use slug_csv::load_slug_csv;
pub use url_list::load_url_list;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::types::SubmissionItem;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

/// Input file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// CSV with a header row and a slug column
    #[default]
    SlugCsv,
    /// One URL or path per line
    UrlList,
}

/// Load all items for a run, leading pages first
pub fn load_items(
    path: &Path,
    format: SourceFormat,
    config: &SourceConfig,
) -> Result<Vec<SubmissionItem>> {
    let from_file = match format {
        SourceFormat::SlugCsv => load_slug_csv(path, config)?,
        SourceFormat::UrlList => load_url_list(path, config)?,
    };

    let mut items: Vec<SubmissionItem> = config
        .leading_paths
        .iter()
        .map(|p| SubmissionItem::new(config.page_url(p), config.kind))
        .collect();
    items.extend(from_file);

    info!(
        path = %path.display(),
        count = items.len(),
        leading = config.leading_paths.len(),
        "loaded items"
    );
    Ok(items)
}

pub(crate) fn ensure_exists(path: &Path, what: &'static str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::InputNotFound {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Build an item if `candidate` parses as an absolute http(s) URL
pub(crate) fn checked_item(
    candidate: String,
    config: &SourceConfig,
    line: usize,
) -> Option<SubmissionItem> {
    match Url::parse(&candidate) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {
            Some(SubmissionItem::new(candidate, config.kind))
        }
        Ok(u) => {
            warn!(line, url = %candidate, scheme = u.scheme(), "skipping non-http URL");
            None
        }
        Err(e) => {
            warn!(line, url = %candidate, error = %e, "skipping invalid URL");
            None
        }
    }
}
