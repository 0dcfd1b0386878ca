//! CLI commands
//!
//! Command implementations for the `bulk-indexer` binary.

mod auth;
mod logging;
mod progress;
mod rewrite;
mod status;
pub mod style;
mod submit;

pub use auth::{run_auth_setup, run_auth_test};
pub use logging::init_logging;
pub use rewrite::run_rewrite_slugs;
pub use status::run_status;
pub use submit::{SubmitArgs, run_submit};

use bulk_indexer::indexing::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use clap::Args;
use std::path::PathBuf;

/// Credentials and endpoint shared by commands that call the API
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Service account key file (JSON)
    #[arg(long, env = "BULK_INDEXER_CREDENTIALS", value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Indexing API base URL
    #[arg(long, env = "BULK_INDEXER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "BULK_INDEXER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}
