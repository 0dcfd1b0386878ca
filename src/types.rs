//! Core types for bulk-indexer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of notification sent for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NotificationKind {
    /// The page is new or its content changed
    #[default]
    #[serde(rename = "URL_UPDATED")]
    Updated,
    /// The page was removed
    #[serde(rename = "URL_DELETED")]
    Deleted,
}

impl NotificationKind {
    /// Wire name used by the Indexing API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "URL_UPDATED",
            Self::Deleted => "URL_DELETED",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work submitted to the indexing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionItem {
    /// Absolute URL being announced
    pub url: String,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl SubmissionItem {
    /// Create an item
    pub fn new(url: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    /// Create a `URL_UPDATED` item
    pub fn updated(url: impl Into<String>) -> Self {
        Self::new(url, NotificationKind::Updated)
    }
}

/// Outcome of a single submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Endpoint accepted the notification
    Success,
    /// Attempt failed; the item is not retried within the run
    Failure {
        /// Human-readable cause
        reason: String,
    },
}

impl SubmitOutcome {
    /// Whether the attempt succeeded
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    /// Next item would have exceeded the quota
    QuotaExhausted,
    /// Failures exceeded the failure limit
    Aborted,
    /// Every item was attempted
    Completed,
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotaExhausted => write!(f, "quota exhausted"),
            Self::Aborted => write!(f, "aborted"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Counters for one run
///
/// `submitted == succeeded + failed` holds after every call to [`RunState::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Attempts made
    pub submitted: usize,
    /// Attempts that succeeded
    pub succeeded: usize,
    /// Attempts that failed
    pub failed: usize,
    /// Whether the run stopped on the failure limit
    pub aborted: bool,
}

impl RunState {
    /// Tally one attempt
    pub fn record(&mut self, outcome: &SubmitOutcome) {
        self.submitted += 1;
        match outcome {
            SubmitOutcome::Success => self.succeeded += 1,
            SubmitOutcome::Failure { .. } => self.failed += 1,
        }
    }
}

/// An item whose submission failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    /// Zero-based position in the input
    pub index: usize,
    /// URL that failed
    pub url: String,
    /// Failure cause
    pub reason: String,
}

/// Final result of a run, returned to the caller instead of printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Final counters
    pub state: RunState,
    /// Terminal state reached
    pub terminal: TerminalState,
    /// Number of items supplied
    pub total_items: usize,
    /// Items never attempted
    pub skipped: usize,
    /// Failed attempts in input order
    pub failures: Vec<FailedItem>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run stopped
    pub finished_at: DateTime<Utc>,
}

/// One entry of a URL's notification history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// URL the notification was for
    pub url: String,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// When Google received it
    pub notify_time: DateTime<Utc>,
}

/// Latest notifications Google has on record for a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMetadata {
    /// URL queried
    pub url: String,
    /// Most recent `URL_UPDATED`
    #[serde(default)]
    pub latest_update: Option<NotificationRecord>,
    /// Most recent `URL_DELETED`
    #[serde(default)]
    pub latest_remove: Option<NotificationRecord>,
}
