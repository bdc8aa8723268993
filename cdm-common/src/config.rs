// cdm-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{CdmError, Result};

/// Chrome-for-Testing distribution endpoint serving the version indexes and
/// the driver archives they point at.
pub const DEFAULT_BASE_URL: &str = "https://googlechromelabs.github.io/chrome-for-testing";

/// Name of the binary entry inside the driver archive, and of the installed file.
pub const DRIVER_BINARY_NAME: &str = "chromedriver";

const STAGING_DIR_NAME: &str = "chromedriver";
const LATEST_INDEX_FILENAME: &str = "last-known-good-versions-with-downloads.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Install root; the staging tree lives directly beneath it.
    pub root_dir: PathBuf,
    pub base_url: String,
    /// When set, resolution uses the exact-version index instead of the
    /// last-known-good one.
    pub pinned_version: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading cdm configuration");

        let root_dir = match env::var("CDM_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(|e| {
                CdmError::Config(format!("Could not determine working directory: {e}"))
            })?,
        };

        let base_url = env::var("CDM_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        debug!("Effective install root: {}", root_dir.display());
        Ok(Self {
            root_dir,
            base_url,
            pinned_version: None,
        })
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root_dir = root;
        self
    }

    pub fn with_pinned_version(mut self, version: Option<String>) -> Self {
        self.pinned_version = version;
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The directory under which archives, extraction folders and version
    /// folders all live.
    pub fn staging_dir(&self) -> PathBuf {
        self.root_dir.join(STAGING_DIR_NAME)
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.staging_dir().join(version)
    }

    pub fn installed_binary_path(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(DRIVER_BINARY_NAME)
    }

    pub fn archive_path(&self, filename: &str) -> PathBuf {
        self.staging_dir().join(filename)
    }

    pub fn index_url(&self) -> String {
        match &self.pinned_version {
            Some(version) => format!("{}/{version}.json", self.base_url),
            None => format!("{}/{LATEST_INDEX_FILENAME}", self.base_url),
        }
    }

    /// Glob pattern locating the installed binary without knowing the version.
    pub fn driver_glob_pattern(&self) -> String {
        format!("{}/*/{DRIVER_BINARY_NAME}", self.staging_dir().display())
    }
}
