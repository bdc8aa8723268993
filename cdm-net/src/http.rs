use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cdm_common::config::Config;
use cdm_common::error::{CdmError, Result};
use cdm_common::model::ResolvedVersion;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use tokio::fs::File as TokioFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::validation::validate_url;

const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = "cdm driver manager (Rust; +https://github.com/cdm-tools/cdm)";

/// Builds the HTTP client used for one `install()` run. The client is dropped
/// together with the run, so no connection outlives it.
pub fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, USER_AGENT_STRING.parse().unwrap());
    headers.insert(ACCEPT, "*/*".parse().unwrap());
    let client = Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;
    Ok(client)
}

/// Fetches and parses the version index selected by `config` (exact-version
/// when a version is pinned, last-known-good otherwise).
pub async fn fetch_version_index(client: &Client, config: &Config) -> Result<ResolvedVersion> {
    let url = config.index_url();
    validate_url(&url)?;
    debug!("Fetching version index from {url}");

    let response = client.get(&url).send().await?;
    let status = response.status();
    debug!("Received HTTP status {status} for {url}");
    if status != StatusCode::OK {
        return Err(CdmError::RemoteIndex {
            status: status.as_u16(),
            url,
        });
    }

    let body = response.text().await?;
    let resolved = if config.pinned_version.is_some() {
        ResolvedVersion::from_exact_document(&body)?
    } else {
        ResolvedVersion::from_latest_document(&body)?
    };
    debug!(
        "Resolved driver version {} with {} download entries",
        resolved.version,
        resolved.downloads.len()
    );
    Ok(resolved)
}

/// Downloads the artifact at `url` into `staging_dir`, creating the directory
/// if absent. The body is written to a temporary file first and renamed into
/// place once complete, so a failed download never leaves a partial archive
/// under the final name.
pub async fn download_artifact(client: &Client, url: &str, staging_dir: &Path) -> Result<PathBuf> {
    validate_url(url)?;
    let filename = url
        .split('/')
        .next_back()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CdmError::Validation(format!("Artifact URL '{url}' has no filename segment"))
        })?;

    fs::create_dir_all(staging_dir).map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to create staging directory {}: {e}",
            staging_dir.display()
        ))
    })?;

    let final_path = staging_dir.join(filename);
    let temp_path = staging_dir.join(format!(".{filename}.download"));
    if temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!(
                "Could not remove existing temporary file {}: {e}",
                temp_path.display()
            );
        }
    }

    debug!("Downloading artifact from {url} to {}", final_path.display());
    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("Received HTTP status {status} for {url}");
    if status != StatusCode::OK {
        return Err(CdmError::Download {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let content = response.bytes().await?;
    let mut temp_file = TokioFile::create(&temp_path).await.map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to create temp file {}: {e}",
            temp_path.display()
        ))
    })?;
    temp_file.write_all(&content).await.map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to write download to {}: {e}",
            temp_path.display()
        ))
    })?;
    temp_file.flush().await.map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to write download to {}: {e}",
            temp_path.display()
        ))
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &final_path).map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to move temp file {} to {}: {e}",
            temp_path.display(),
            final_path.display()
        ))
    })?;
    debug!("Finished writing artifact to {}", final_path.display());
    Ok(final_path)
}
