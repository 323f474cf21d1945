use crate::core::app::JobApp;
use crate::core::job::check_app_ports;
use crate::core::job_ref::{JobId, JobRef, JobRefId};
use crate::core::requirements::Requirements;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Template for a job, authored before any run context exists.
///
/// Holds only execution inputs. Status, timestamps, host, ports, runner and
/// request ids, tags and deps come from submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Only submission assigns an id; input files cannot.
    #[serde(skip_deserializing)]
    pub id: JobRefId,
    pub image_name: String,
    #[serde(default)]
    pub commands: Option<Vec<String>>,
    #[serde(default)]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub artifacts: Option<Vec<String>>,
    #[serde(default)]
    pub port_count: Option<usize>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
    #[serde(default)]
    pub master_job: Option<JobRefId>,
    #[serde(default)]
    pub apps: Option<Vec<JobApp>>,
}

impl JobRef for JobSpec {
    fn get_id(&self) -> Option<JobId> {
        self.id.get_id()
    }

    fn set_id(&self, id: JobId) {
        self.id.set_id(id)
    }
}

impl JobSpec {
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            id: JobRefId::unresolved(),
            image_name: image_name.into(),
            commands: None,
            env: None,
            working_dir: None,
            artifacts: None,
            port_count: None,
            requirements: None,
            master_job: None,
            apps: None,
        }
    }

    /// A handle sharing this spec's identity cell. After the spec is
    /// submitted the handle resolves to the submitted job's id.
    pub fn job_ref(&self) -> JobRefId {
        self.id.clone()
    }

    pub fn commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    pub fn artifacts(mut self, artifacts: Vec<String>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn port_count(mut self, port_count: usize) -> Self {
        self.port_count = Some(port_count);
        self
    }

    pub fn requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn master_job(mut self, master_job: JobRefId) -> Self {
        self.master_job = Some(master_job);
        self
    }

    pub fn apps(mut self, apps: Vec<JobApp>) -> Self {
        self.apps = Some(apps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(requirements) = &self.requirements {
            requirements.validate()?;
        }
        check_app_ports(self.port_count, self.apps.as_deref())
    }
}
