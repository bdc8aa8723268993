//! Orchestrates one driver install run: resolve, match, download, extract,
//! relocate, clean up.

use std::fs;
use std::path::PathBuf;

use cdm_common::config::{Config, DRIVER_BINARY_NAME};
use cdm_common::error::{CdmError, Result};
use cdm_net::http;
use tracing::{debug, info};

use crate::extract::{self, ExtractOutcome};
use crate::platform::{self, Platform};

pub struct Installer {
    config: Config,
}

impl Installer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Installs the driver for the detected host platform and returns the
    /// absolute path to the installed binary. Idempotent: if the resolved
    /// version is already installed, nothing is downloaded.
    pub async fn install(&self) -> Result<PathBuf> {
        let platform = Platform::detect()?;
        self.install_for(platform).await
    }

    /// Same as [`Installer::install`], with the platform supplied by the
    /// caller instead of detected from the host.
    pub async fn install_for(&self, platform: Platform) -> Result<PathBuf> {
        info!("Target platform: {platform}");

        // One client per run; dropped with this call on every exit path.
        let client = http::build_http_client()?;

        let resolved = http::fetch_version_index(&client, &self.config).await?;
        info!("Found ChromeDriver version {}", resolved.version);

        let version_dir = self.config.version_dir(&resolved.version);
        if version_dir.is_dir() {
            info!(
                "ChromeDriver {} is already installed, skipping download",
                resolved.version
            );
            return Ok(self.config.installed_binary_path(&resolved.version));
        }

        let entry = platform::select_download(&resolved.downloads, platform)?;
        let stem = platform::archive_stem(&entry.url)?;
        debug!("Extraction folder for this artifact: {stem}");

        let staging_dir = self.config.staging_dir();
        let archive_path = http::download_artifact(&client, &entry.url, &staging_dir).await?;
        info!("Downloaded {}", archive_path.display());

        let entry_name = format!("{stem}/{DRIVER_BINARY_NAME}");
        match extract::extract_driver_binary(&archive_path, &staging_dir, &entry_name)? {
            ExtractOutcome::Extracted(path) => {
                debug!("Driver binary extracted to {}", path.display());
            }
            ExtractOutcome::EntryMissing => {
                return Err(CdmError::ArchiveEntryMissing {
                    entry: entry_name,
                    archive: archive_path.display().to_string(),
                });
            }
        }

        let extracted_dir = staging_dir.join(&stem);
        fs::rename(&extracted_dir, &version_dir).map_err(|e| {
            CdmError::Filesystem(format!(
                "Failed to rename {} to {}: {e}",
                extracted_dir.display(),
                version_dir.display()
            ))
        })?;
        info!("Renamed [{stem}] => [{}]", resolved.version);

        // Only reached on the download path, so the archive is known to exist.
        fs::remove_file(&archive_path).map_err(|e| {
            CdmError::Filesystem(format!(
                "Failed to remove archive {}: {e}",
                archive_path.display()
            ))
        })?;
        debug!("Removed archive {}", archive_path.display());

        let binary_path = self.config.installed_binary_path(&resolved.version);
        info!("ChromeDriver installed at {}", binary_path.display());
        Ok(binary_path)
    }

    /// Removes the entire staging root. Unlike the install path this has no
    /// tolerance for a missing directory.
    pub fn clear(&self) -> Result<()> {
        let staging_dir = self.config.staging_dir();
        if !staging_dir.is_dir() {
            return Err(CdmError::DirectoryNotFound(staging_dir));
        }
        fs::remove_dir_all(&staging_dir).map_err(|e| {
            CdmError::Filesystem(format!(
                "Failed to remove staging root {}: {e}",
                staging_dir.display()
            ))
        })?;
        info!("Removed staging root {}", staging_dir.display());
        Ok(())
    }

    /// Glob pattern locating the installed binary for callers that do not
    /// know the exact version.
    pub fn driver_glob_pattern(&self) -> String {
        self.config.driver_glob_pattern()
    }
}
