use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CdmError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Network(#[from] Arc<reqwest::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Version index request to '{url}' returned HTTP status {status}")]
    RemoteIndex { status: u16, url: String },

    #[error("Artifact download from '{url}' returned HTTP status {status}")]
    Download { status: u16, url: String },

    #[error("Malformed version index: {0}")]
    MalformedIndex(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("No download entry matches platform '{0}'")]
    NoMatchingArtifact(String),

    #[error("Archive entry '{entry}' not found in {archive}")]
    ArchiveEntryMissing { entry: String, archive: String },

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Filesystem Error: {0}")]
    Filesystem(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(String),
}

impl From<std::io::Error> for CdmError {
    fn from(err: std::io::Error) -> Self {
        CdmError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for CdmError {
    fn from(err: reqwest::Error) -> Self {
        CdmError::Network(Arc::new(err))
    }
}

impl From<serde_json::Error> for CdmError {
    fn from(err: serde_json::Error) -> Self {
        CdmError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CdmError>;
