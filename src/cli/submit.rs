//! Submit command - publish a list of URLs within the daily quota

use crate::cli::ConnectionArgs;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, Tone, arrow, cross, link, spinner};
use anstream::{eprintln, println};
use bulk_indexer::auth::{AuthSource, get_google_auth};
use bulk_indexer::config::{
    DEFAULT_FAILURE_LIMIT, DEFAULT_QUOTA, DEFAULT_SLUG_COLUMN, SourceConfig, SubmitLimits,
};
use bulk_indexer::error::Result;
use bulk_indexer::indexing::create_indexing_service;
use bulk_indexer::source::{SourceFormat, load_items};
use bulk_indexer::submit::{
    NoopProgress, Phase, ProgressCallback, SubmissionPlan, create_submission_plan,
    execute_submission,
};
use bulk_indexer::types::{NotificationKind, RunReport, TerminalState};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// CSV with a header row and a slug column
    Csv,
    /// One URL or site path per line
    List,
}

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// `URL_UPDATED`
    Updated,
    /// `URL_DELETED`
    Deleted,
}

/// Arguments for `submit`
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// CSV of slugs or list of URLs
    pub input: PathBuf,

    /// Site the slugs belong to, e.g. <https://example.org>
    #[arg(long, env = "BULK_INDEXER_SITE_URL")]
    pub site_url: String,

    /// Input file format
    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    pub format: InputFormat,

    /// CSV column holding slugs
    #[arg(long, default_value = DEFAULT_SLUG_COLUMN)]
    pub slug_column: String,

    /// Site path to submit before the file contents (repeatable, "/" for the root)
    #[arg(long = "lead", value_name = "PATH")]
    pub leading_paths: Vec<String>,

    /// Notification kind sent for every URL
    #[arg(long, value_enum, default_value_t = KindArg::Updated)]
    pub kind: KindArg,

    /// Maximum submissions this run
    #[arg(long, env = "BULK_INDEXER_QUOTA", default_value_t = DEFAULT_QUOTA)]
    pub quota: usize,

    /// Abort once more than this many submissions fail
    #[arg(long, env = "BULK_INDEXER_FAILURE_LIMIT", default_value_t = DEFAULT_FAILURE_LIMIT)]
    pub failure_limit: usize,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Dry run - show what would be submitted without contacting the API
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final report as JSON instead of progress lines
    #[arg(long)]
    pub json: bool,
}

/// Run the submit command
///
/// Returns `None` for a dry run.
pub async fn run_submit(args: &SubmitArgs) -> Result<Option<RunReport>> {
    // Validate everything before touching files or the network
    let limits = SubmitLimits::new(args.quota, args.failure_limit)?;
    let kind = match args.kind {
        KindArg::Updated => NotificationKind::Updated,
        KindArg::Deleted => NotificationKind::Deleted,
    };
    let source = SourceConfig::new(&args.site_url)?
        .with_slug_column(args.slug_column.clone())
        .with_leading_paths(args.leading_paths.clone())
        .with_kind(kind);
    let format = match args.format {
        InputFormat::Csv => SourceFormat::SlugCsv,
        InputFormat::List => SourceFormat::UrlList,
    };

    let cli_progress;
    let progress: &dyn ProgressCallback = if args.json {
        &NoopProgress
    } else {
        cli_progress = CliProgress::new(0);
        &cli_progress
    };

    progress.on_phase(Phase::Loading).await;
    let items = load_items(&args.input, format, &source)?;
    if items.is_empty() && !args.json {
        eprintln!("{}", "No URLs found in input".warn());
    }

    let plan = create_submission_plan(&items, limits);

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(None);
    }

    progress.on_phase(Phase::Authenticating).await;
    let waiting = (!args.json).then(|| spinner("Acquiring access token..."));
    let auth = get_google_auth(args.connection.credentials.as_deref()).await;
    if let Some(bar) = waiting {
        bar.finish_and_clear();
    }
    let auth = auth?;

    if !args.json {
        println!("  {} {}", arrow(), describe_source(&auth.source).muted());
    }

    let service = create_indexing_service(
        auth,
        &args.connection.endpoint,
        Duration::from_secs(args.connection.timeout_secs),
    )?;
    info!(endpoint = service.endpoint(), planned = plan.to_submit.len(), "starting run");

    let report = if args.json {
        execute_submission(&items, limits, service.as_ref(), &NoopProgress).await
    } else {
        let progress = CliProgress::new(plan.to_submit.len());
        execute_submission(&items, limits, service.as_ref(), &progress).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, limits);
    }

    Ok(Some(report))
}

fn describe_source(source: &AuthSource) -> String {
    match source {
        AuthSource::ServiceAccount(path) => format!("service account {}", path.display()),
        AuthSource::EnvVar => "token from environment".to_string(),
        AuthSource::Cli => "token from gcloud".to_string(),
    }
}

fn print_dry_run(plan: &SubmissionPlan) {
    println!("Dry run - nothing will be submitted");
    if plan.is_empty() {
        println!("Nothing to submit");
        return;
    }

    println!(
        "Would submit {} URL{}:",
        plan.to_submit.len().accent(),
        plural(plan.to_submit.len())
    );
    for item in &plan.to_submit {
        println!(
            "  - {} {}",
            link(&item.url),
            item.kind.muted()
        );
    }

    if !plan.over_quota.is_empty() {
        println!(
            "{}",
            format!(
                "Over quota ({}), left for a later run: {}",
                plan.limits.quota,
                plan.over_quota.len()
            )
            .warn()
            .to_stdout()
        );
    }
}

/// Plain-text summary lines; styling is applied by the caller
pub fn summary_lines(report: &RunReport, limits: SubmitLimits) -> Vec<String> {
    let state = &report.state;
    let mut lines = vec![format!(
        "Run {}: {} succeeded, {} failed, {} skipped of {}",
        report.terminal, state.succeeded, state.failed, report.skipped, report.total_items
    )];

    match report.terminal {
        TerminalState::QuotaExhausted => lines.push(format!(
            "Quota of {} reached; request a quota increase or rerun tomorrow for the remaining {}.",
            limits.quota, report.skipped
        )),
        TerminalState::Aborted => lines.push(format!(
            "More than {} submissions failed; check that the account owns the site in Search Console.",
            limits.failure_limit
        )),
        TerminalState::Completed => {}
    }

    lines
}

fn print_summary(report: &RunReport, limits: SubmitLimits) {
    println!();
    let lines = summary_lines(report, limits);
    for (i, line) in lines.iter().enumerate() {
        let tone = Tone::for_terminal(report.terminal);
        if i == 0 {
            println!("{}", line.emphasis());
        } else if report.terminal == TerminalState::Aborted {
            eprintln!("{}", line.tone(tone));
        } else {
            println!("{}", line.tone(tone).to_stdout());
        }
    }

    if !report.failures.is_empty() {
        eprintln!("Failed URLs:");
        for failure in &report.failures {
            eprintln!("  {} {}: {}", cross(), failure.url, failure.reason.muted());
        }
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
