use crate::core::job_ref::JobId;
use crate::core::status::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing view of a job.
///
/// Always derived from a [`Job`](crate::core::job::Job) through
/// [`Job::head`](crate::core::job::Job::head); it never carries execution
/// inputs (commands, env, requirements) and is never the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHead {
    pub repo_user_name: String,
    pub repo_name: String,
    /// `None` until the job has been submitted.
    pub job_id: Option<JobId>,
    pub run_name: String,
    pub workflow_name: Option<String>,
    pub provider_name: String,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub runner_id: Option<String>,
    pub request_id: Option<String>,
    pub artifacts: Option<Vec<String>>,
    pub tag_name: Option<String>,
    /// App names only, in the job's order.
    pub apps: Option<Vec<String>>,
}

impl JobHead {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}
