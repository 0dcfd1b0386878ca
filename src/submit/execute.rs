//! Submission execution
//!
//! Strictly sequential: each publish is awaited before the next item is
//! considered. Per-item errors are tallied, never propagated.

use crate::config::SubmitLimits;
use crate::error::Result;
use crate::indexing::IndexingService;
use crate::submit::{Phase, ProgressCallback};
use crate::types::{FailedItem, RunReport, RunState, SubmissionItem, SubmitOutcome, TerminalState};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Convert a publish result into an outcome
pub fn classify(result: Result<()>) -> SubmitOutcome {
    match result {
        Ok(()) => SubmitOutcome::Success,
        Err(e) => SubmitOutcome::Failure {
            reason: e.to_string(),
        },
    }
}

/// Submit `items` in order
///
/// Stops before item `quota` (quota exhausted), right after the failure that
/// takes `failed` past `failure_limit` (aborted), or when the items run out
/// (completed).
pub async fn execute_submission(
    items: &[SubmissionItem],
    limits: SubmitLimits,
    service: &dyn IndexingService,
    progress: &dyn ProgressCallback,
) -> RunReport {
    let started_at = Utc::now();
    let mut state = RunState::default();
    let mut failures = Vec::new();
    let mut terminal = TerminalState::Completed;

    progress.on_phase(Phase::Submitting).await;

    for (index, item) in items.iter().enumerate() {
        if index >= limits.quota {
            let remaining = items.len() - index;
            info!(quota = limits.quota, remaining, "quota reached");
            progress
                .on_message(&format!(
                    "Quota of {} reached; {remaining} left for the next run",
                    limits.quota
                ))
                .await;
            terminal = TerminalState::QuotaExhausted;
            break;
        }

        progress.on_item_started(index, item).await;
        let result = service.publish(item).await;
        if let Err(e) = &result {
            if !e.is_transport() {
                warn!(url = %item.url, error = %e, "unexpected error during publish");
                progress.on_error(e).await;
            }
        }
        let outcome = classify(result);

        if let SubmitOutcome::Failure { reason } = &outcome {
            debug!(index, url = %item.url, %reason, "submission failed");
            failures.push(FailedItem {
                index,
                url: item.url.clone(),
                reason: reason.clone(),
            });
        }
        state.record(&outcome);
        progress.on_item_finished(index, item, &outcome).await;

        if state.failed > limits.failure_limit {
            warn!(
                failed = state.failed,
                limit = limits.failure_limit,
                "failure limit exceeded, aborting"
            );
            state.aborted = true;
            terminal = TerminalState::Aborted;
            break;
        }
    }

    debug_assert_eq!(state.submitted, state.succeeded + state.failed);
    debug_assert!(state.submitted <= items.len().min(limits.quota));

    progress.on_stopped(terminal, &state).await;
    progress.on_phase(Phase::Complete).await;

    RunReport {
        state,
        terminal,
        total_items: items.len(),
        skipped: items.len() - state.submitted,
        failures,
        started_at,
        finished_at: Utc::now(),
    }
}
