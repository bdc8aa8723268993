use std::path::PathBuf;

use cdm_common::config::Config;
use cdm_common::error::Result;
use cdm_core::Installer;
use clap::Args;
use tracing::warn;

#[derive(Args, Debug)]
pub struct Which {
    /// Install root (defaults to the current directory, or CDM_ROOT)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print only the glob pattern, without resolving installed versions
    #[arg(long)]
    pub pattern_only: bool,
}

impl Which {
    pub fn run(&self, config: Config) -> Result<()> {
        let mut config = config;
        if let Some(root) = &self.root {
            config = config.with_root(root.clone());
        }

        let installer = Installer::new(config);
        let pattern = installer.driver_glob_pattern();
        println!("{pattern}");
        if self.pattern_only {
            return Ok(());
        }

        match glob::glob(&pattern) {
            Ok(paths) => {
                for path in paths.flatten() {
                    println!("{}", path.display());
                }
            }
            Err(e) => warn!("Invalid glob pattern '{pattern}': {e}"),
        }
        Ok(())
    }
}
