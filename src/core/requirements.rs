use crate::error::{ModelError, Result};
use crate::utils::parse_size_mib;
use serde::{Deserialize, Serialize};

/// GPU constraints. `None` on any axis means the scheduler may pick freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpusRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Per-GPU memory floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mib: Option<u64>,
    /// Specific GPU model to match, e.g. `"A100"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GpusRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn memory_mib(mut self, memory_mib: u64) -> Self {
        self.memory_mib = Some(memory_mib);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.count.is_none() && self.memory_mib.is_none() && self.name.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == Some(0) {
            return Err(ModelError::InvalidRequirements(
                "gpus.count must be positive; omit it to leave the count unconstrained"
                    .to_string(),
            ));
        }
        if self.memory_mib == Some(0) {
            return Err(ModelError::InvalidRequirements(
                "gpus.memory_mib must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resource requirements handed to the scheduler.
///
/// A value with every field `None` places no constraint at all. Absence is
/// the only "unconstrained" marker: zero is rejected by [`Requirements::validate`]
/// so that "no GPU needed" and "GPU count not decided" never collapse into a
/// sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mib: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpus: Option<GpusRequirements>,
    /// Shared memory size with a unit suffix, e.g. `"8G"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shm_size: Option<String>,
    /// Whether the job tolerates running on preemptible capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interruptible: Option<bool>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cpus(mut self, cpus: u32) -> Self {
        self.cpus = Some(cpus);
        self
    }

    pub fn memory_mib(mut self, memory_mib: u64) -> Self {
        self.memory_mib = Some(memory_mib);
        self
    }

    pub fn gpus(mut self, gpus: GpusRequirements) -> Self {
        self.gpus = Some(gpus);
        self
    }

    pub fn shm_size(mut self, shm_size: impl Into<String>) -> Self {
        self.shm_size = Some(shm_size.into());
        self
    }

    pub fn interruptible(mut self, interruptible: bool) -> Self {
        self.interruptible = Some(interruptible);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.cpus.is_none()
            && self.memory_mib.is_none()
            && self.gpus.is_none()
            && self.shm_size.is_none()
            && self.interruptible.is_none()
    }

    /// Shared memory size in MiB, if one was requested.
    pub fn shm_size_mib(&self) -> Result<Option<u64>> {
        self.shm_size
            .as_deref()
            .map(|size| {
                parse_size_mib(size).map_err(|e| {
                    ModelError::InvalidRequirements(format!("shm_size {size:?}: {e:#}"))
                })
            })
            .transpose()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cpus == Some(0) {
            return Err(ModelError::InvalidRequirements(
                "cpus must be positive".to_string(),
            ));
        }
        if self.memory_mib == Some(0) {
            return Err(ModelError::InvalidRequirements(
                "memory_mib must be positive".to_string(),
            ));
        }
        if let Some(gpus) = &self.gpus {
            gpus.validate()?;
        }
        self.shm_size_mib()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_reads_back_absent() {
        let req = Requirements::new();
        assert_eq!(req.cpus, None);
        assert_eq!(req.memory_mib, None);
        assert_eq!(req.gpus, None);
        assert_eq!(req.shm_size, None);
        assert_eq!(req.interruptible, None);
        assert!(req.is_unconstrained());

        let gpus = GpusRequirements::new();
        assert_eq!(gpus.count, None);
        assert_eq!(gpus.memory_mib, None);
        assert_eq!(gpus.name, None);
        assert!(gpus.is_unconstrained());
    }

    #[test]
    fn test_absent_survives_serialization() {
        let req = Requirements::new().gpus(GpusRequirements::new());

        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"gpus":{}}"#);
        let back: Requirements = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
        assert_eq!(back.cpus, None);
        assert_eq!(back.gpus.as_ref().unwrap().count, None);

        let bytes = rmp_serde::to_vec_named(&req).unwrap();
        let back: Requirements = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_present_values_survive_serialization() {
        let req = Requirements::new()
            .cpus(4)
            .memory_mib(16 * 1024)
            .gpus(GpusRequirements::new().count(2).memory_mib(40 * 1024).name("A100"))
            .shm_size("8G")
            .interruptible(false);

        let back: Requirements =
            serde_json::from_str(&serde_json::to_string(&req).unwrap()).unwrap();
        assert_eq!(back, req);
        assert_eq!(back.interruptible, Some(false));
    }

    #[test]
    fn test_validate_rejects_zero_sentinels() {
        assert!(Requirements::new().validate().is_ok());
        assert!(matches!(
            Requirements::new().cpus(0).validate(),
            Err(ModelError::InvalidRequirements(_))
        ));
        assert!(Requirements::new().memory_mib(0).validate().is_err());
        assert!(Requirements::new()
            .gpus(GpusRequirements::new().count(0))
            .validate()
            .is_err());
        assert!(Requirements::new()
            .gpus(GpusRequirements::new().memory_mib(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_shm_size() {
        assert_eq!(Requirements::new().shm_size_mib().unwrap(), None);
        assert_eq!(
            Requirements::new().shm_size("8G").shm_size_mib().unwrap(),
            Some(8192)
        );
        assert!(matches!(
            Requirements::new().shm_size("lots").validate(),
            Err(ModelError::InvalidRequirements(_))
        ));
    }

    #[test]
    fn test_negative_count_is_not_representable() {
        assert!(serde_json::from_str::<Requirements>(r#"{"cpus":-1}"#).is_err());
    }

    #[test]
    fn test_debug_renders_absent_fields() {
        let rendered = format!("{:?}", Requirements::new().shm_size("1G"));
        assert_eq!(
            rendered,
            r#"Requirements { cpus: None, memory_mib: None, gpus: None, shm_size: Some("1G"), interruptible: None }"#
        );
    }
}
