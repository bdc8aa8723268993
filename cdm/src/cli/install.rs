use std::path::PathBuf;

use cdm_common::config::Config;
use cdm_common::error::Result;
use cdm_core::Installer;
use clap::Args;
use colored::Colorize;
use tracing::instrument;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Pin an exact driver version instead of resolving the latest stable one
    #[arg(long, value_name = "VERSION")]
    pub pin: Option<String>,

    /// Install root (defaults to the current directory, or CDM_ROOT)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl InstallArgs {
    #[instrument(skip(self, config), fields(pin = ?self.pin))]
    pub async fn run(&self, config: Config) -> Result<()> {
        let mut config = config.with_pinned_version(self.pin.clone());
        if let Some(root) = &self.root {
            config = config.with_root(root.clone());
        }

        let installer = Installer::new(config);
        let path = installer.install().await?;
        println!(
            "✓ ChromeDriver ready at {}",
            path.display().to_string().green()
        );
        Ok(())
    }
}
