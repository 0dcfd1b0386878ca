//! In-place slug rewriting for slug CSV files

use crate::error::{Error, Result};
use crate::source::ensure_exists;
use csv::StringRecord;
use std::path::Path;
use tracing::{info, warn};

/// Counts for a slug rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Rows written back
    pub kept: usize,
    /// Kept rows whose slug changed
    pub changed: usize,
    /// Rows dropped because their field count did not match the header
    pub dropped: usize,
}

/// A computed rewrite, not yet written
#[derive(Debug, Clone)]
pub struct SlugRewrite {
    header: StringRecord,
    rows: Vec<StringRecord>,
    /// What writing this rewrite will do
    pub summary: RewriteSummary,
}

impl SlugRewrite {
    /// Compute the rewrite of `column`, replacing every `from` with `to`
    pub fn plan(path: &Path, column: &str, from: &str, to: &str) -> Result<Self> {
        ensure_exists(path, "CSV file")?;
        if from.is_empty() {
            return Err(Error::Config("--from must not be empty".to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let header = reader.headers()?.clone();
        let col = header.iter().position(|h| h == column).ok_or_else(|| {
            Error::Config(format!("column '{column}' not found in {}", path.display()))
        })?;

        let mut rows = Vec::new();
        let mut summary = RewriteSummary::default();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != header.len() {
                warn!(line = idx + 2, fields = record.len(), "dropping malformed row");
                summary.dropped += 1;
                continue;
            }

            let rewritten: StringRecord = record
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    if i == col {
                        field.replace(from, to)
                    } else {
                        field.to_string()
                    }
                })
                .collect();

            if rewritten != record {
                summary.changed += 1;
            }
            summary.kept += 1;
            rows.push(rewritten);
        }

        Ok(Self {
            header,
            rows,
            summary,
        })
    }

    /// Write header and kept rows to `path`, replacing its contents
    ///
    /// Rows are staged in a temporary file next to `path` and renamed over
    /// it, so a failed write leaves the existing file intact.
    pub fn write(&self, path: &Path) -> Result<RewriteSummary> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staged = tempfile::NamedTempFile::new_in(dir)?;

        let mut writer = csv::Writer::from_writer(staged.as_file());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        drop(writer);

        staged.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(
            path = %path.display(),
            kept = self.summary.kept,
            changed = self.summary.changed,
            "rewrote slugs"
        );
        Ok(self.summary)
    }
}

/// Rewrite slugs in place
pub fn rewrite_slugs(path: &Path, column: &str, from: &str, to: &str) -> Result<RewriteSummary> {
    SlugRewrite::plan(path, column, from, to)?.write(path)
}
