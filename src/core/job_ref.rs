//! Deferred job identity.
//!
//! Jobs are wired together (a worker pointing at its `master_job`) before any
//! of them has a persistent identifier. Every participant therefore refers to
//! a shared identity cell; once submission writes an id into the cell, every
//! holder of a handle observes it.

use crate::error::{ModelError, Result};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

pub type JobId = CompactString;

/// Anything that can stand in for "a job" in a job graph.
pub trait JobRef {
    fn get_id(&self) -> Option<JobId>;

    /// Overwrites the current identifier. Calling it again is not an error.
    fn set_id(&self, id: JobId);

    /// The identifier, or `UnresolvedReference` if none has been assigned yet.
    fn require_id(&self) -> Result<JobId> {
        self.get_id().ok_or_else(|| {
            ModelError::UnresolvedReference("job has not been assigned an id yet".to_string())
        })
    }
}

/// Shared handle to a job identifier.
///
/// Clones share the same cell: `set_id` through one clone is visible through
/// all of them. Serialization writes the current id (or `null`); a
/// deserialized handle starts a fresh, unshared cell.
#[derive(Clone, Default)]
pub struct JobRefId {
    cell: Arc<RwLock<Option<JobId>>>,
}

impl JobRefId {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self::from_option(Some(id.into()))
    }

    /// A reference whose target has not been submitted yet.
    pub fn unresolved() -> Self {
        Self::default()
    }

    fn from_option(id: Option<JobId>) -> Self {
        Self {
            cell: Arc::new(RwLock::new(id)),
        }
    }

    /// Whether both handles point at the same identity cell.
    pub fn same_cell(&self, other: &JobRefId) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl JobRef for JobRefId {
    fn get_id(&self) -> Option<JobId> {
        self.cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_id(&self, id: JobId) {
        *self.cell.write().unwrap_or_else(PoisonError::into_inner) = Some(id);
    }
}

/// Two handles are equal when they share a cell or both carry the same id.
/// Unresolved handles on different cells never compare equal.
impl PartialEq for JobRefId {
    fn eq(&self, other: &Self) -> bool {
        if self.same_cell(other) {
            return true;
        }
        match (self.get_id(), other.get_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for JobRefId {}

impl fmt::Debug for JobRefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JobRefId").field(&self.get_id()).finish()
    }
}

impl From<JobId> for JobRefId {
    fn from(id: JobId) -> Self {
        Self::new(id)
    }
}

impl From<&str> for JobRefId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for JobRefId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.get_id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JobRefId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<JobId>::deserialize(deserializer).map(Self::from_option)
    }
}
