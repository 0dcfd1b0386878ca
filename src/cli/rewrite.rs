//! Rewrite-slugs command - bulk find/replace in a slug CSV

use crate::cli::style::{Stylize, check};
use anstream::println;
use bulk_indexer::error::{Error, Result};
use bulk_indexer::source::SlugRewrite;
use dialoguer::Confirm;
use std::path::Path;

/// Run the rewrite-slugs command
pub fn run_rewrite_slugs(path: &Path, column: &str, from: &str, to: &str, yes: bool) -> Result<()> {
    let rewrite = SlugRewrite::plan(path, column, from, to)?;
    let summary = rewrite.summary;

    println!(
        "{} rows, {} slugs to change, {} malformed rows to drop",
        summary.kept.accent(),
        summary.changed.accent(),
        summary.dropped.accent()
    );

    if summary.changed == 0 && summary.dropped == 0 {
        println!("Nothing to do");
        return Ok(());
    }

    if !yes {
        let proceed = Confirm::new()
            .with_prompt(format!("Rewrite {} in place?", path.display()))
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("prompt failed: {e}")))?;
        if !proceed {
            println!("{}", "Cancelled".muted());
            return Ok(());
        }
    }

    rewrite.write(path)?;
    println!(
        "{} Rewrote '{}' to '{}' in {}",
        check(),
        from,
        to,
        path.display()
    );
    Ok(())
}
