use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use runjob::config::OutputFormat;
use runjob::utils::STYLES;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "runjob",
    author,
    version,
    styles = STYLES,
    about = "Validate job specs and preview the jobs a run would submit."
)]
pub struct RunJob {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[arg(long, global = true, help = "Path to the config file")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub enum Commands {
    /// Validate job specs and print their full rendering
    Check(CheckArgs),
    /// Submit job specs as one run and print the resulting job heads
    Submit(SubmitArgs),
    /// Generate tab-completion scripts for your shell
    #[command(arg_required_else_help = true)]
    Completion {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// YAML or JSON file with one spec or a list of specs
    pub file: PathBuf,
}

#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// YAML or JSON file with one spec or a list of specs
    pub file: PathBuf,

    /// Repository owner
    #[arg(long)]
    pub repo_user: String,

    /// Repository name
    #[arg(long)]
    pub repo_name: String,

    /// Branch the run was submitted from
    #[arg(long)]
    pub branch: Option<String>,

    /// Run name (a random one is generated when omitted)
    #[arg(long, short = 'r')]
    pub run_name: Option<String>,

    /// Workflow name (defaults to `submission.default_workflow`)
    #[arg(long, short = 'w')]
    pub workflow: Option<String>,

    /// Provider name (defaults to `submission.default_provider`)
    #[arg(long, short = 'p')]
    pub provider: Option<String>,

    /// Tag the run
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Runs this run depends on, as `user/repo/run`
    #[arg(long = "dep", value_name = "USER/REPO/RUN")]
    pub deps: Vec<String>,

    /// Output format (defaults to `display.format`)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<Format>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => OutputFormat::Table,
            Format::Json => OutputFormat::Json,
        }
    }
}
