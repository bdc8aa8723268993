//! Typed model of the Chrome-for-Testing version indexes.
//!
//! Two document shapes exist: the exact-version index (`{version}.json`) has
//! top-level `version`/`downloads`, while the last-known-good index nests the
//! same payload under `channels.Stable`.

use serde::Deserialize;

use super::error::{CdmError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadEntry {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformDownloads {
    #[serde(default)]
    pub chromedriver: Vec<DownloadEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub version: String,
    pub downloads: PlatformDownloads,
}

#[derive(Debug, Clone, Deserialize)]
struct Channels {
    #[serde(rename = "Stable")]
    stable: VersionManifest,
}

#[derive(Debug, Clone, Deserialize)]
struct LatestIndex {
    channels: Channels,
}

/// Resolver output: the target version together with its unfiltered
/// per-platform download list.
#[derive(Debug, Clone)]
pub struct ResolvedVersion {
    pub version: String,
    pub downloads: Vec<DownloadEntry>,
}

impl ResolvedVersion {
    pub fn from_exact_document(body: &str) -> Result<Self> {
        let manifest: VersionManifest = serde_json::from_str(body)
            .map_err(|e| CdmError::MalformedIndex(format!("exact-version document: {e}")))?;
        Ok(Self {
            version: manifest.version,
            downloads: manifest.downloads.chromedriver,
        })
    }

    pub fn from_latest_document(body: &str) -> Result<Self> {
        let index: LatestIndex = serde_json::from_str(body)
            .map_err(|e| CdmError::MalformedIndex(format!("last-known-good document: {e}")))?;
        let stable = index.channels.stable;
        Ok(Self {
            version: stable.version,
            downloads: stable.downloads.chromedriver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT_DOC: &str = r#"{
        "version": "124.0.6367.91",
        "downloads": {
            "chrome": [{"platform": "linux64", "url": "https://example.com/chrome-linux64.zip"}],
            "chromedriver": [
                {"platform": "mac-x64", "url": "https://example.com/chromedriver-mac-x64.zip"},
                {"platform": "linux64", "url": "https://example.com/chromedriver-linux64.zip"}
            ]
        }
    }"#;

    const LATEST_DOC: &str = r#"{
        "timestamp": "2024-04-29T08:09:12.773Z",
        "channels": {
            "Stable": {
                "channel": "Stable",
                "version": "124.0.6367.91",
                "downloads": {
                    "chromedriver": [
                        {"platform": "linux64", "url": "https://example.com/chromedriver-linux64.zip"}
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn exact_document_yields_version_and_driver_downloads() {
        let resolved = ResolvedVersion::from_exact_document(EXACT_DOC).unwrap();
        assert_eq!(resolved.version, "124.0.6367.91");
        assert_eq!(resolved.downloads.len(), 2);
        assert_eq!(resolved.downloads[0].platform, "mac-x64");
        assert_eq!(resolved.downloads[1].platform, "linux64");
    }

    #[test]
    fn latest_document_resolves_through_the_stable_channel() {
        let resolved = ResolvedVersion::from_latest_document(LATEST_DOC).unwrap();
        assert_eq!(resolved.version, "124.0.6367.91");
        assert_eq!(
            resolved.downloads[0].url,
            "https://example.com/chromedriver-linux64.zip"
        );
    }

    #[test]
    fn latest_document_without_stable_channel_is_malformed() {
        let body = r#"{"channels": {"Beta": {"version": "1", "downloads": {}}}}"#;
        let err = ResolvedVersion::from_latest_document(body).unwrap_err();
        assert!(matches!(err, CdmError::MalformedIndex(_)), "{err}");
    }

    #[test]
    fn exact_document_without_version_field_is_malformed() {
        let body = r#"{"downloads": {"chromedriver": []}}"#;
        let err = ResolvedVersion::from_exact_document(body).unwrap_err();
        assert!(matches!(err, CdmError::MalformedIndex(_)), "{err}");
    }

    #[test]
    fn missing_chromedriver_download_list_defaults_to_empty() {
        let body = r#"{"version": "124.0.6367.91", "downloads": {}}"#;
        let resolved = ResolvedVersion::from_exact_document(body).unwrap();
        assert!(resolved.downloads.is_empty());
    }
}
