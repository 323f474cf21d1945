pub mod app;
pub mod dep;
pub mod head;
pub mod job;
pub mod job_ref;
pub mod repo;
pub mod requirements;
pub mod spec;
pub mod status;
pub mod submission;

pub use app::JobApp;
pub use dep::Dep;
pub use head::JobHead;
pub use job::{Job, JobBuilder};
pub use job_ref::{JobId, JobRef, JobRefId};
pub use repo::RepoData;
pub use requirements::{GpusRequirements, Requirements};
pub use spec::JobSpec;
pub use status::JobStatus;
pub use submission::{random_run_name, submit, submit_all, RunContext};

use std::path::PathBuf;

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to get config directory"))
        .map(|p| p.join("runjob"))
}
