use crate::core::dep::Dep;
use crate::core::job::{Job, JobBuilder};
use crate::core::job_ref::{JobId, JobRef};
use crate::core::repo::RepoData;
use crate::core::spec::JobSpec;
use crate::core::status::JobStatus;
use crate::error::{ModelError, Result};
use chrono::{DateTime, Utc};
use compact_str::format_compact;
use rand::Rng;

/// Run-level metadata shared by every job of a run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub repo_data: RepoData,
    pub run_name: String,
    pub workflow_name: Option<String>,
    pub provider_name: String,
    pub deps: Option<Vec<Dep>>,
    pub tag_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new(
        repo_data: RepoData,
        run_name: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Self {
        Self {
            repo_data,
            run_name: run_name.into(),
            workflow_name: None,
            provider_name: provider_name.into(),
            deps: None,
            tag_name: None,
            submitted_at: Utc::now(),
        }
    }

    pub fn workflow_name(mut self, workflow_name: impl Into<String>) -> Self {
        self.workflow_name = Some(workflow_name.into());
        self
    }

    pub fn deps(mut self, deps: Vec<Dep>) -> Self {
        self.deps = Some(deps);
        self
    }

    pub fn tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    pub fn submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }
}

fn new_job_id() -> JobId {
    format_compact!("{}", uuid::Uuid::new_v4().simple())
}

/// Turns a spec into a submitted job.
///
/// Every call yields a job with its own identity cell and a fresh id. The id
/// is also written into the spec's cell so references obtained through
/// [`JobSpec::job_ref`] resolve; submitting the same spec again moves those
/// references to the newer job and leaves the earlier job untouched.
pub fn submit(spec: &JobSpec, ctx: &RunContext) -> Result<Job> {
    let job = build_job(spec, ctx)?;
    assign_id(spec, &job);
    Ok(job)
}

/// Submits every spec of a run, in order.
///
/// Every `master_job` must either already carry an id or point at one of
/// `specs`; otherwise the call fails with `UnresolvedReference`. All specs are
/// checked before any id is written, so on error no spec has changed.
pub fn submit_all(specs: &[JobSpec], ctx: &RunContext) -> Result<Vec<Job>> {
    for (index, spec) in specs.iter().enumerate() {
        let Some(master) = &spec.master_job else {
            continue;
        };
        let in_run = specs.iter().any(|s| s.id.same_cell(master));
        if !in_run && master.get_id().is_none() {
            tracing::warn!(index, run_name = %ctx.run_name, "master_job is outside the run");
            return Err(ModelError::UnresolvedReference(format!(
                "master_job of spec #{index} in run {} is never submitted",
                ctx.run_name
            )));
        }
    }

    let jobs = specs
        .iter()
        .map(|spec| build_job(spec, ctx))
        .collect::<Result<Vec<_>>>()?;
    for (spec, job) in specs.iter().zip(&jobs) {
        assign_id(spec, job);
    }

    tracing::info!(count = jobs.len(), run_name = %ctx.run_name, "Run submitted");
    Ok(jobs)
}

fn build_job(spec: &JobSpec, ctx: &RunContext) -> Result<Job> {
    spec.validate()?;

    let mut builder = JobBuilder::new(
        ctx.repo_data.clone(),
        ctx.run_name.clone(),
        ctx.provider_name.clone(),
        spec.image_name.clone(),
    )
    .workflow_name(ctx.workflow_name.clone())
    .status(JobStatus::Submitted)
    .submitted_at(ctx.submitted_at)
    .tag_name(ctx.tag_name.clone());

    if let Some(commands) = &spec.commands {
        builder = builder.commands(commands.iter().cloned());
    }
    if let Some(env) = &spec.env {
        builder = builder.env(env.clone());
    }
    if let Some(working_dir) = &spec.working_dir {
        builder = builder.working_dir(working_dir.clone());
    }
    if let Some(artifacts) = &spec.artifacts {
        builder = builder.artifacts(artifacts.clone());
    }
    if let Some(port_count) = spec.port_count {
        builder = builder.port_count(port_count);
    }
    if let Some(requirements) = &spec.requirements {
        builder = builder.requirements(requirements.clone());
    }
    if let Some(deps) = &ctx.deps {
        builder = builder.deps(deps.clone());
    }
    if let Some(master_job) = &spec.master_job {
        builder = builder.master_job(master_job.clone());
    }
    if let Some(apps) = &spec.apps {
        builder = builder.apps(apps.clone());
    }

    builder.build()
}

fn assign_id(spec: &JobSpec, job: &Job) {
    let job_id = new_job_id();
    job.set_id(job_id.clone());
    spec.set_id(job_id.clone());

    tracing::debug!(
        job_id = %job_id,
        run_name = %job.run_name,
        image = %job.image_name,
        "Job submitted"
    );
}

/// Generates a run name such as `sleepy-3fa85f64`.
pub fn random_run_name() -> String {
    const WORDS: &[&str] = &[
        "Lion", "Tiger", "Elephant", "Giraffe", "Bear", "Monkey", "Zebra", "Kangaroo", "Panda",
        "Penguin", "Happy", "Sad", "Angry", "Sleepy", "Hungry", "Thirsty", "Silly", "Crazy",
        "Funny", "Grumpy",
    ];

    let mut rng = rand::rng();
    format!(
        "{}-{}",
        WORDS[rng.random_range(0..WORDS.len())].to_lowercase(),
        &uuid::Uuid::new_v4().simple().to_string()[..8]
    )
}
