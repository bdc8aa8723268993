// cdm/src/main.rs
use std::process;

use cdm_common::config::Config;
use cdm_common::error::Result;
use clap::Parser;
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::CliArgs;

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();

    let level_filter = match cli_args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("CDM_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();

    if let Err(e) = run(cli_args).await {
        error!("Command failed: {e}");
        eprintln!("{}: {e}", "Error".red().bold());
        process::exit(1);
    }
    debug!("Command completed successfully.");
}

async fn run(cli_args: CliArgs) -> Result<()> {
    let config = Config::load()?;
    cli_args.command.run(config).await
}
