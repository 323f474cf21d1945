use serde::{Deserialize, Serialize};

/// Repository coordinates a job was submitted from.
///
/// Resolved outside this crate by the version-control layer; the model only
/// carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoData {
    pub repo_user_name: String,
    pub repo_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_hash: Option<String>,
    /// Uncommitted changes on top of `repo_hash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_diff: Option<String>,
}

impl RepoData {
    pub fn new(repo_user_name: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            repo_user_name: repo_user_name.into(),
            repo_name: repo_name.into(),
            repo_branch: None,
            repo_hash: None,
            repo_diff: None,
        }
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.repo_branch = Some(branch.into());
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.repo_hash = Some(hash.into());
        self
    }

    pub fn diff(mut self, diff: impl Into<String>) -> Self {
        self.repo_diff = Some(diff.into());
        self
    }
}
