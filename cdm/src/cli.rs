// cdm/src/cli.rs
//! Defines the command-line argument structure using clap.
use cdm_common::config::Config;
use cdm_common::error::Result;
use clap::{ArgAction, Parser, Subcommand};

// Module declarations
pub mod clear;
pub mod install;
pub mod which;

use crate::cli::clear::Clear;
use crate::cli::install::InstallArgs;
use crate::cli::which::Which;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "cdm", bin_name = "cdm")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Install(InstallArgs),
    Clear(Clear),
    Which(Which),
}

impl Command {
    pub async fn run(&self, config: Config) -> Result<()> {
        match self {
            Self::Install(command) => command.run(config).await,
            Self::Clear(command) => command.run(config),
            Self::Which(command) => command.run(config),
        }
    }
}
