use serde::{Deserialize, Serialize};

/// Another run this job's run depends on.
///
/// Addressed by `(repo_user_name, repo_name, run_name)` because the other
/// run's job ids are unknown when the dependency is declared. Lists of deps
/// are kept as given: duplicates are allowed and never collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dep {
    pub repo_user_name: String,
    pub repo_name: String,
    pub run_name: String,
}

impl Dep {
    pub fn new(
        repo_user_name: impl Into<String>,
        repo_name: impl Into<String>,
        run_name: impl Into<String>,
    ) -> Self {
        Self {
            repo_user_name: repo_user_name.into(),
            repo_name: repo_name.into(),
            run_name: run_name.into(),
        }
    }
}
