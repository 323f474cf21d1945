use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Lifecycle status of a job.
///
/// The lowercase tokens are what other components persist and parse, so they
/// must stay exactly as they are.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(
    serialize_all = "lowercase",
    parse_err_ty = ModelError,
    parse_err_fn = unknown_status
)]
pub enum JobStatus {
    Submitted,
    Preparing,
    Running,
    Stopping,
    Stopped,
    Aborting,
    Aborted,
    Failed,
    Done,
}

impl JobStatus {
    /// Statuses after which a job never runs again.
    pub const FINISHED: [JobStatus; 4] = [
        JobStatus::Stopped,
        JobStatus::Aborted,
        JobStatus::Failed,
        JobStatus::Done,
    ];

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Stopped | JobStatus::Aborted | JobStatus::Failed | JobStatus::Done
        )
    }

    pub fn is_unfinished(&self) -> bool {
        !self.is_finished()
    }
}

fn unknown_status(token: &str) -> ModelError {
    ModelError::UnknownStatus(token.to_string())
}
