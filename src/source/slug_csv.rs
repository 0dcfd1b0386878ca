//! Slug CSV reader

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::source::{checked_item, ensure_exists};
use crate::types::SubmissionItem;
use std::path::Path;
use tracing::debug;

/// Read page slugs from a CSV file and join them onto the site URL
///
/// Rows with an empty or missing slug are skipped. Line numbers in logs are
/// 1-based and count the header.
pub fn load_slug_csv(path: &Path, config: &SourceConfig) -> Result<Vec<SubmissionItem>> {
    ensure_exists(path, "CSV file")?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == config.slug_column)
        .ok_or_else(|| {
            Error::Config(format!(
                "column '{}' not found in {}",
                config.slug_column,
                path.display()
            ))
        })?;

    let mut items = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = idx + 2;

        let Some(slug) = record.get(column).filter(|s| !s.is_empty()) else {
            debug!(line, "no slug, skipping row");
            continue;
        };

        if let Some(item) = checked_item(config.page_url(slug), config, line) {
            items.push(item);
        }
    }

    Ok(items)
}
