use std::path::PathBuf;

use cdm_common::config::Config;
use cdm_common::error::Result;
use cdm_core::Installer;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct Clear {
    /// Install root (defaults to the current directory, or CDM_ROOT)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl Clear {
    pub fn run(&self, config: Config) -> Result<()> {
        let mut config = config;
        if let Some(root) = &self.root {
            config = config.with_root(root.clone());
        }

        let installer = Installer::new(config);
        installer.clear()?;
        println!("✓ {}", "Removed installed drivers".green());
        Ok(())
    }
}
