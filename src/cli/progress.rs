//! CLI progress callback with styled output

use crate::cli::style::{Stylize, Tone, check, cross, item_counter, outcome_label};
use anstream::{eprintln, print, println};
use async_trait::async_trait;
use bulk_indexer::error::Error;
use bulk_indexer::submit::{Phase, ProgressCallback};
use bulk_indexer::types::{RunState, SubmissionItem, SubmitOutcome, TerminalState};
use std::io::Write;

/// Prints one line per item: `(n/total) url... done`
pub struct CliProgress {
    /// Number of items that fit in the quota, for the counter
    pub planned: usize,
}

impl CliProgress {
    /// Create progress for a run of `planned` attempts at most
    pub const fn new(planned: usize) -> Self {
        Self { planned }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => {}
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_item_started(&self, index: usize, item: &SubmissionItem) {
        print!("  {} {}... ", item_counter(index, self.planned), item.url.accent());
        let _ = std::io::stdout().flush();
    }

    async fn on_item_finished(
        &self,
        _index: usize,
        _item: &SubmissionItem,
        outcome: &SubmitOutcome,
    ) {
        println!("{}", outcome_label(outcome));
        if let SubmitOutcome::Failure { reason } = outcome {
            eprintln!("    {} {}", cross(), reason.error());
        }
    }

    async fn on_stopped(&self, terminal: TerminalState, state: &RunState) {
        let tone = Tone::for_terminal(terminal);
        match terminal {
            TerminalState::Completed => {
                println!("{} All {} items attempted", check(), state.submitted);
            }
            TerminalState::QuotaExhausted => {
                eprintln!("{}", "Quota reached, pausing until the next run".tone(tone));
            }
            TerminalState::Aborted => {
                eprintln!(
                    "{}",
                    format!("Aborted after {} failures", state.failed).tone(tone)
                );
            }
        }
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "error".error(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
