//! Bulk submission engine
//!
//! 1. Planning - split items into those within quota and those over it
//! 2. Execution - submit in order until the items run out, the quota is
//!    reached, or failures exceed the limit

mod execute;
mod plan;
mod progress;

pub use execute::{classify, execute_submission};
pub use plan::{SubmissionPlan, create_submission_plan};
pub use progress::{NoopProgress, Phase, ProgressCallback};
