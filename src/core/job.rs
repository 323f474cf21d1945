use crate::core::app::JobApp;
use crate::core::dep::Dep;
use crate::core::head::JobHead;
use crate::core::job_ref::{JobId, JobRef, JobRefId};
use crate::core::repo::RepoData;
use crate::core::requirements::Requirements;
use crate::core::status::JobStatus;
use crate::error::{ModelError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The authoritative job record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Assigned once, at submission. Other jobs may already hold clones of
    /// this handle through [`Job::job_ref`].
    pub id: JobRefId,
    pub repo_data: RepoData,
    pub run_name: String,
    pub workflow_name: Option<String>,
    /// Executor implementation that interprets this job.
    pub provider_name: String,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,

    // Execution inputs
    pub image_name: String,
    pub commands: Option<Vec<String>>,
    pub env: Option<BTreeMap<String, String>>,
    pub working_dir: Option<String>,
    pub artifacts: Option<Vec<String>>,
    pub port_count: Option<usize>,
    pub requirements: Option<Requirements>,
    pub deps: Option<Vec<Dep>>,
    /// Coordinating job of a multi-node run.
    pub master_job: Option<JobRefId>,
    pub apps: Option<Vec<JobApp>>,

    // Populated by the allocation service and the runner
    pub ports: Option<Vec<u16>>,
    pub host_name: Option<String>,
    pub runner_id: Option<String>,
    pub request_id: Option<String>,
    pub tag_name: Option<String>,
}

impl JobRef for Job {
    fn get_id(&self) -> Option<JobId> {
        self.id.get_id()
    }

    fn set_id(&self, id: JobId) {
        self.id.set_id(id)
    }
}

impl Job {
    pub fn builder(
        repo_data: RepoData,
        run_name: impl Into<String>,
        provider_name: impl Into<String>,
        image_name: impl Into<String>,
    ) -> JobBuilder {
        JobBuilder::new(repo_data, run_name, provider_name, image_name)
    }

    /// A handle sharing this job's identity cell.
    pub fn job_ref(&self) -> JobRefId {
        self.id.clone()
    }

    /// Listing projection. Pure: calling it twice on an unchanged job yields
    /// equal heads.
    pub fn head(&self) -> JobHead {
        JobHead {
            repo_user_name: self.repo_data.repo_user_name.clone(),
            repo_name: self.repo_data.repo_name.clone(),
            job_id: self.get_id(),
            run_name: self.run_name.clone(),
            workflow_name: self.workflow_name.clone(),
            provider_name: self.provider_name.clone(),
            status: self.status,
            submitted_at: self.submitted_at,
            runner_id: self.runner_id.clone(),
            request_id: self.request_id.clone(),
            artifacts: self.artifacts.clone(),
            tag_name: self.tag_name.clone(),
            apps: self
                .apps
                .as_ref()
                .map(|apps| apps.iter().map(|a| a.app_name.clone()).collect()),
        }
    }

    /// Records the ports allocated for this job.
    pub fn assign_ports(&mut self, ports: Vec<u16>) -> Result<()> {
        check_port_allocation(self.port_count, &ports)?;
        tracing::debug!(job_id = ?self.get_id(), ports = ?ports, "Ports assigned");
        self.ports = Some(ports);
        Ok(())
    }

    /// Checks requirements, the port allocation and every app's port index.
    pub fn validate(&self) -> Result<()> {
        if let Some(requirements) = &self.requirements {
            requirements.validate()?;
        }
        if let Some(ports) = &self.ports {
            check_port_allocation(self.port_count, ports)?;
        }
        check_app_ports(self.port_count, self.apps.as_deref())
    }
}

pub(crate) fn check_port_allocation(port_count: Option<usize>, ports: &[u16]) -> Result<()> {
    let expected = port_count.unwrap_or(0);
    if ports.len() != expected {
        return Err(ModelError::PortAllocationMismatch(format!(
            "{} ports assigned but port_count is {}",
            ports.len(),
            expected
        )));
    }
    Ok(())
}

pub(crate) fn check_app_ports(port_count: Option<usize>, apps: Option<&[JobApp]>) -> Result<()> {
    let port_count = port_count.unwrap_or(0);
    for app in apps.unwrap_or_default() {
        if app.port_index >= port_count {
            return Err(ModelError::PortAllocationMismatch(format!(
                "app {:?} uses port_index {} but the job declares {} ports",
                app.app_name, app.port_index, port_count
            )));
        }
    }
    Ok(())
}

/// Assembles a [`Job`] and validates it before handing it out.
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(
        repo_data: RepoData,
        run_name: impl Into<String>,
        provider_name: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Self {
        Self {
            job: Job {
                id: JobRefId::unresolved(),
                repo_data,
                run_name: run_name.into(),
                workflow_name: None,
                provider_name: provider_name.into(),
                status: JobStatus::Submitted,
                submitted_at: Utc::now(),
                image_name: image_name.into(),
                commands: None,
                env: None,
                working_dir: None,
                artifacts: None,
                port_count: None,
                requirements: None,
                deps: None,
                master_job: None,
                apps: None,
                ports: None,
                host_name: None,
                runner_id: None,
                request_id: None,
                tag_name: None,
            },
        }
    }

    pub fn workflow_name(mut self, workflow_name: Option<String>) -> Self {
        self.job.workflow_name = workflow_name;
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.job.status = status;
        self
    }

    pub fn submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.job.submitted_at = submitted_at;
        self
    }

    pub fn commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job.commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    pub fn env(mut self, env: BTreeMap<String, String>) -> Self {
        self.job.env = Some(env);
        self
    }

    pub fn working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.job.working_dir = Some(working_dir.into());
        self
    }

    pub fn artifacts(mut self, artifacts: Vec<String>) -> Self {
        self.job.artifacts = Some(artifacts);
        self
    }

    pub fn port_count(mut self, port_count: usize) -> Self {
        self.job.port_count = Some(port_count);
        self
    }

    pub fn ports(mut self, ports: Vec<u16>) -> Self {
        self.job.ports = Some(ports);
        self
    }

    pub fn host_name(mut self, host_name: impl Into<String>) -> Self {
        self.job.host_name = Some(host_name.into());
        self
    }

    pub fn requirements(mut self, requirements: Requirements) -> Self {
        self.job.requirements = Some(requirements);
        self
    }

    pub fn deps(mut self, deps: Vec<Dep>) -> Self {
        self.job.deps = Some(deps);
        self
    }

    pub fn master_job(mut self, master_job: JobRefId) -> Self {
        self.job.master_job = Some(master_job);
        self
    }

    pub fn apps(mut self, apps: Vec<JobApp>) -> Self {
        self.job.apps = Some(apps);
        self
    }

    pub fn runner_id(mut self, runner_id: impl Into<String>) -> Self {
        self.job.runner_id = Some(runner_id.into());
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.job.request_id = Some(request_id.into());
        self
    }

    pub fn tag_name(mut self, tag_name: Option<String>) -> Self {
        self.job.tag_name = tag_name;
        self
    }

    pub fn build(self) -> Result<Job> {
        if let Err(e) = self.job.validate() {
            tracing::warn!(run_name = %self.job.run_name, error = %e, "Rejected job");
            return Err(e);
        }
        Ok(self.job)
    }
}
