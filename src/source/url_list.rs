//! Plain URL list reader

use crate::config::SourceConfig;
use crate::error::Result;
use crate::source::{checked_item, ensure_exists};
use crate::types::SubmissionItem;
use std::path::Path;
use tracing::warn;

/// Read one URL per line
///
/// Blank lines and `#` comments are ignored. Lines without a scheme are
/// treated as paths on the site.
pub fn load_url_list(path: &Path, config: &SourceConfig) -> Result<Vec<SubmissionItem>> {
    ensure_exists(path, "URL list")?;
    let contents = std::fs::read_to_string(path)?;

    Ok(contents
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let candidate = if line.contains("://") {
                line.to_string()
            } else {
                if looks_like_host(line) {
                    warn!(
                        line = idx + 1,
                        entry = line,
                        "entry has no scheme but starts with a host name; treating it as a site path"
                    );
                }
                config.page_url(line)
            };
            checked_item(candidate, config, idx + 1)
        })
        .collect())
}

/// Whether the first segment of a scheme-less entry reads like `example.org`
fn looks_like_host(entry: &str) -> bool {
    if entry.starts_with('/') {
        return false;
    }
    let first = entry.split('/').next().unwrap_or_default();
    let labels: Vec<&str> = first.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| !l.is_empty())
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
