use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let args = cli::RunJob::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.verbosity.tracing_level_filter())
        .init();

    tracing::debug!("{:?}", args);

    let config = runjob::config::load_config(args.config.as_ref())?;
    commands::handle_commands(&config, args.command)
}
