//! Progress callback trait for interface-agnostic updates
//!
//! The CLI prints these; library callers and tests can ignore them with
//! [`NoopProgress`].

use crate::error::Error;
use crate::types::{RunState, SubmissionItem, SubmitOutcome, TerminalState};
use async_trait::async_trait;
use std::fmt;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the input file
    Loading,
    /// Resolving credentials
    Authenticating,
    /// Submitting items
    Submitting,
    /// Run finished
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading items"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// `index` arguments are zero-based positions in the input.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called right before an item is submitted
    async fn on_item_started(&self, index: usize, item: &SubmissionItem);

    /// Called with the classified outcome of an item
    async fn on_item_finished(&self, index: usize, item: &SubmissionItem, outcome: &SubmitOutcome);

    /// Called once when the run reaches its terminal state
    async fn on_stopped(&self, terminal: TerminalState, state: &RunState);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_item_started(&self, _index: usize, _item: &SubmissionItem) {}
    async fn on_item_finished(
        &self,
        _index: usize,
        _item: &SubmissionItem,
        _outcome: &SubmitOutcome,
    ) {
    }
    async fn on_stopped(&self, _terminal: TerminalState, _state: &RunState) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
