use crate::cli::Commands;
use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use runjob::config::Config;
use runjob::core::{JobRefId, JobSpec};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

mod check;
mod submit;

pub fn handle_commands(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Check(args) => check::handle_check(args),
        Commands::Submit(args) => submit::handle_submit(config, args),
        Commands::Completion { shell } => {
            let mut cmd = crate::cli::RunJob::command();
            let mut buf = Vec::<u8>::new();
            clap_complete::generate(shell, &mut cmd, "runjob", &mut buf);
            match std::io::stdout().write_all(&buf) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// One entry of a spec file. `master_index` points `master_job` at another
/// entry of the same file, by position.
#[derive(Deserialize)]
struct SpecEntry {
    #[serde(flatten)]
    spec: JobSpec,
    #[serde(default)]
    master_index: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecFile {
    Many(Vec<SpecEntry>),
    One(Box<SpecEntry>),
}

/// Load job specs from a YAML or JSON file. JSON is picked by extension,
/// anything else is read as YAML.
pub(crate) fn load_specs(path: &Path) -> Result<Vec<JobSpec>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed: SpecFile = if is_json {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {path:?}"))?
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {path:?}"))?
    };

    let entries = match parsed {
        SpecFile::Many(entries) => entries,
        SpecFile::One(entry) => vec![*entry],
    };
    let specs =
        link_masters(entries).with_context(|| format!("Invalid master_index in {path:?}"))?;
    tracing::debug!(count = specs.len(), path = ?path, "Loaded job specs");
    Ok(specs)
}

fn link_masters(entries: Vec<SpecEntry>) -> Result<Vec<JobSpec>> {
    let refs: Vec<JobRefId> = entries.iter().map(|e| e.spec.job_ref()).collect();

    let mut specs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let mut spec = entry.spec;
        if let Some(master) = entry.master_index {
            if master == index || master >= refs.len() {
                bail!(
                    "spec #{index} has master_index {master}, expected another entry below {}",
                    refs.len()
                );
            }
            if spec.master_job.is_some() {
                bail!("spec #{index} sets both master_job and master_index");
            }
            spec.master_job = Some(refs[master].clone());
        }
        specs.push(spec);
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runjob::core::JobRef;
    use std::io::Write as _;

    fn write_yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_master_index_links_siblings() {
        let file = write_yaml("- image_name: img\n- image_name: img\n  master_index: 0\n");
        let specs = load_specs(file.path()).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs[0].master_job.is_none());
        assert!(specs[1]
            .master_job
            .as_ref()
            .unwrap()
            .same_cell(&specs[0].job_ref()));

        specs[0].set_id("m-1".into());
        assert_eq!(
            specs[1].master_job.as_ref().unwrap().get_id().as_deref(),
            Some("m-1")
        );
    }

    #[test]
    fn test_master_index_out_of_range() {
        let file = write_yaml("- image_name: img\n  master_index: 0\n");
        assert!(load_specs(file.path()).is_err());

        let file = write_yaml("- image_name: img\n- image_name: img\n  master_index: 5\n");
        assert!(load_specs(file.path()).is_err());
    }

    #[test]
    fn test_single_spec_file() {
        let file = write_yaml("image_name: img\nport_count: 1\n");
        let specs = load_specs(file.path()).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].port_count, Some(1));
    }

    #[test]
    fn test_demo_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/multinode.yaml");
        let specs = load_specs(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs[1]
            .master_job
            .as_ref()
            .unwrap()
            .same_cell(&specs[0].job_ref()));
    }
}
