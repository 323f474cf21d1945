use crate::cli::CheckArgs;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use runjob::core::Requirements;
use runjob::utils::format_mib;

pub fn handle_check(args: CheckArgs) -> Result<()> {
    let specs = super::load_specs(&args.file)?;

    let mut invalid = 0usize;
    for (index, spec) in specs.iter().enumerate() {
        match spec.validate() {
            Ok(()) => {
                println!(
                    "{} spec #{index} [{}]",
                    "ok".green(),
                    summarize(spec.requirements.as_ref())
                );
                println!("  {spec:?}");
            }
            Err(e) => {
                invalid += 1;
                println!("{} spec #{index}: {e}", "invalid".red());
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} specs are invalid", specs.len());
    }
    Ok(())
}

/// One-line resource summary, e.g. `cpus=8 mem=32G gpus=4xA100 shm=8G`.
fn summarize(requirements: Option<&Requirements>) -> String {
    let Some(req) = requirements.filter(|r| !r.is_unconstrained()) else {
        return "any capacity".to_string();
    };

    let mut parts = Vec::new();
    if let Some(cpus) = req.cpus {
        parts.push(format!("cpus={cpus}"));
    }
    if let Some(memory_mib) = req.memory_mib {
        parts.push(format!("mem={}", format_mib(memory_mib)));
    }
    if let Some(gpus) = &req.gpus {
        let count = gpus.count.map_or("?".to_string(), |c| c.to_string());
        let mut gpu = format!("gpus={count}");
        if let Some(name) = &gpus.name {
            gpu.push_str(&format!("x{name}"));
        }
        if let Some(memory_mib) = gpus.memory_mib {
            gpu.push_str(&format!("@{}", format_mib(memory_mib)));
        }
        parts.push(gpu);
    }
    // Already validated, so the size parses.
    if let Ok(Some(shm_mib)) = req.shm_size_mib() {
        parts.push(format!("shm={}", format_mib(shm_mib)));
    }
    if req.interruptible == Some(true) {
        parts.push("interruptible".to_string());
    }
    parts.join(" ")
}
