//! Submission planning
//!
//! Shows up front which items fit in the quota. Used for dry runs; the
//! executor applies the same cut-off on its own.

use crate::config::SubmitLimits;
use crate::types::SubmissionItem;

/// Submission plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    /// Items within quota, in submission order
    pub to_submit: Vec<SubmissionItem>,
    /// Items that will not be attempted this run
    pub over_quota: Vec<SubmissionItem>,
    /// Limits the plan was made with
    pub limits: SubmitLimits,
}

impl SubmissionPlan {
    /// Whether there is nothing to submit
    pub fn is_empty(&self) -> bool {
        self.to_submit.is_empty()
    }
}

/// Create a submission plan
pub fn create_submission_plan(items: &[SubmissionItem], limits: SubmitLimits) -> SubmissionPlan {
    let cut = items.len().min(limits.quota);
    let (to_submit, over_quota) = items.split_at(cut);

    SubmissionPlan {
        to_submit: to_submit.to_vec(),
        over_quota: over_quota.to_vec(),
        limits,
    }
}
