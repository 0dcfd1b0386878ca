//! bulk-indexer - quota-aware bulk submitter for the Google Indexing API
//!
//! CLI binary for publishing URL notifications in bulk.

use anyhow::Result;
use bulk_indexer::config::DEFAULT_SLUG_COLUMN;
use bulk_indexer::types::TerminalState;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

/// Exit status when the run stopped on the failure limit
const EXIT_ABORTED: u8 = 2;

#[derive(Parser)]
#[command(name = "bulk-indexer")]
#[command(about = "Submit URLs to the Google Indexing API within the daily quota")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish URL notifications from a CSV of slugs or a URL list
    Submit(cli::SubmitArgs),

    /// Show the latest notifications Google has for a URL
    Status {
        /// Absolute URL to look up
        url: String,

        #[command(flatten)]
        connection: cli::ConnectionArgs,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Find and replace inside the slug column of a CSV, in place
    RewriteSlugs {
        /// CSV file to rewrite
        csv: PathBuf,

        /// Text to replace
        #[arg(long)]
        from: String,

        /// Replacement text
        #[arg(long)]
        to: String,

        /// Column holding slugs
        #[arg(long, default_value = DEFAULT_SLUG_COLUMN)]
        slug_column: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test {
        /// Service account key file (JSON)
        #[arg(long, env = "BULK_INDEXER_CREDENTIALS", value_name = "FILE")]
        credentials: Option<PathBuf>,
    },
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Submit(args) => {
            let report = cli::run_submit(&args).await?;
            if report.is_some_and(|r| r.terminal == TerminalState::Aborted) {
                return Ok(ExitCode::from(EXIT_ABORTED));
            }
        }
        Commands::Status { url, connection } => {
            cli::run_status(&url, &connection).await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test { credentials } => {
                cli::run_auth_test(credentials.as_deref()).await?;
            }
            AuthAction::Setup => cli::run_auth_setup(),
        },
        Commands::RewriteSlugs {
            csv,
            from,
            to,
            slug_column,
            yes,
        } => {
            cli::run_rewrite_slugs(&csv, &slug_column, &from, &to, yes)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
