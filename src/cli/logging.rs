//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; user-facing output is printed
//! directly by the commands.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set and no `-v` was given.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "bulk_indexer=warn",
        1 => "bulk_indexer=info",
        _ => "bulk_indexer=debug",
    };

    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
    } else {
        EnvFilter::new(default)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
