use crate::cli::SubmitArgs;
use anyhow::{anyhow, Context, Result};
use owo_colors::OwoColorize;
use runjob::config::{Config, OutputFormat};
use runjob::core::{random_run_name, submit_all, Dep, JobHead, JobStatus, RepoData, RunContext};
use tabled::{settings::Style, Table, Tabled};

pub fn handle_submit(config: &Config, args: SubmitArgs) -> Result<()> {
    let specs = super::load_specs(&args.file)?;

    let mut repo_data = RepoData::new(args.repo_user, args.repo_name);
    if let Some(branch) = args.branch {
        repo_data = repo_data.branch(branch);
    }

    let run_name = args.run_name.unwrap_or_else(random_run_name);
    let provider = args
        .provider
        .unwrap_or_else(|| config.submission.default_provider.clone());

    let mut ctx = RunContext::new(repo_data, run_name, provider);
    if let Some(workflow) = args
        .workflow
        .or_else(|| config.submission.default_workflow.clone())
    {
        ctx = ctx.workflow_name(workflow);
    }
    if let Some(tag) = args.tag {
        ctx = ctx.tag_name(tag);
    }
    if !args.deps.is_empty() {
        let deps = args
            .deps
            .iter()
            .map(|d| parse_dep(d))
            .collect::<Result<Vec<_>>>()?;
        ctx = ctx.deps(deps);
    }

    let jobs = submit_all(&specs, &ctx).context("Failed to submit run")?;
    let heads: Vec<JobHead> = jobs.iter().map(|job| job.head()).collect();

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.display.format);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&heads)?),
        OutputFormat::Table => print_heads(&heads),
    }
    Ok(())
}

fn parse_dep(value: &str) -> Result<Dep> {
    let mut parts = value.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(repo), Some(run))
            if !user.is_empty() && !repo.is_empty() && !run.is_empty() =>
        {
            Ok(Dep::new(user, repo, run))
        }
        _ => Err(anyhow!("Invalid dependency {value:?}. Expected USER/REPO/RUN")),
    }
}

fn colored_status(status: JobStatus) -> String {
    match status {
        JobStatus::Done => status.green().to_string(),
        JobStatus::Failed | JobStatus::Aborted => status.red().to_string(),
        JobStatus::Running | JobStatus::Preparing => status.cyan().to_string(),
        _ => status.yellow().to_string(),
    }
}

fn print_heads(heads: &[JobHead]) {
    #[derive(Tabled)]
    struct HeadRow {
        #[tabled(rename = "JOB")]
        job_id: String,
        #[tabled(rename = "RUN")]
        run_name: String,
        #[tabled(rename = "WORKFLOW")]
        workflow: String,
        #[tabled(rename = "PROVIDER")]
        provider: String,
        #[tabled(rename = "STATUS")]
        status: String,
        #[tabled(rename = "SUBMITTED")]
        submitted_at: String,
        #[tabled(rename = "APPS")]
        apps: String,
    }

    let rows: Vec<HeadRow> = heads
        .iter()
        .map(|h| HeadRow {
            job_id: h.job_id.as_deref().unwrap_or("-").to_string(),
            run_name: h.run_name.clone(),
            workflow: h.workflow_name.clone().unwrap_or_else(|| "-".to_string()),
            provider: h.provider_name.clone(),
            status: colored_status(h.status),
            submitted_at: h.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            apps: h
                .apps
                .as_ref()
                .map(|apps| apps.join(","))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::blank());
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dep() {
        let dep = parse_dep("alice/vision/prep-1").unwrap();
        assert_eq!(dep, Dep::new("alice", "vision", "prep-1"));
        assert!(parse_dep("alice/vision").is_err());
        assert!(parse_dep("alice//run").is_err());
    }
}
