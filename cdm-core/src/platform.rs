//! Host platform detection and download-entry selection.

use std::fmt;

use cdm_common::error::{CdmError, Result};
use cdm_common::model::DownloadEntry;

/// The platforms the version index publishes driver builds for. Anything
/// outside this enumeration is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacX64,
    Linux64,
}

impl Platform {
    /// Maps the host OS to its index identifier. Checked before any artifact
    /// request is made.
    pub fn detect() -> Result<Self> {
        if cfg!(target_os = "macos") {
            Ok(Platform::MacX64)
        } else if cfg!(target_os = "linux") {
            Ok(Platform::Linux64)
        } else {
            Err(CdmError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        }
    }

    /// The platform field value used by the version index.
    pub fn identifier(&self) -> &'static str {
        match self {
            Platform::MacX64 => "mac-x64",
            Platform::Linux64 => "linux64",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Selects the first download entry whose platform field equals the host
/// identifier; the index lists one entry per platform per version.
pub fn select_download(entries: &[DownloadEntry], platform: Platform) -> Result<&DownloadEntry> {
    entries
        .iter()
        .find(|entry| entry.platform == platform.identifier())
        .ok_or_else(|| CdmError::NoMatchingArtifact(platform.identifier().to_string()))
}

/// Derives the temporary extraction directory name from the artifact URL:
/// the final path segment with its extension stripped, e.g.
/// `.../chromedriver-mac-x64.zip` -> `chromedriver-mac-x64`.
pub fn archive_stem(url: &str) -> Result<String> {
    let filename = url
        .split('/')
        .next_back()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CdmError::Validation(format!("Artifact URL '{url}' has no filename segment"))
        })?;
    let stem = match filename.split_once('.') {
        Some((stem, _)) => stem,
        None => filename,
    };
    Ok(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DownloadEntry> {
        vec![
            DownloadEntry {
                platform: "mac-x64".into(),
                url: "https://example.com/mac/chromedriver-mac-x64.zip".into(),
            },
            DownloadEntry {
                platform: "linux64".into(),
                url: "https://example.com/linux/chromedriver-linux64.zip".into(),
            },
        ]
    }

    #[test]
    fn identifiers_match_the_index_platform_fields() {
        assert_eq!(Platform::MacX64.identifier(), "mac-x64");
        assert_eq!(Platform::Linux64.identifier(), "linux64");
    }

    #[test]
    fn selects_exactly_the_entry_for_each_platform() {
        let entries = entries();
        let mac = select_download(&entries, Platform::MacX64).unwrap();
        assert!(mac.url.contains("mac-x64"));
        let linux = select_download(&entries, Platform::Linux64).unwrap();
        assert!(linux.url.contains("linux64"));
    }

    #[test]
    fn missing_platform_entry_is_an_error() {
        let entries = vec![DownloadEntry {
            platform: "win64".into(),
            url: "https://example.com/chromedriver-win64.zip".into(),
        }];
        let err = select_download(&entries, Platform::Linux64).unwrap_err();
        assert!(matches!(err, CdmError::NoMatchingArtifact(p) if p == "linux64"));
    }

    #[test]
    fn archive_stem_strips_the_extension_of_the_last_segment() {
        assert_eq!(
            archive_stem("https://example.com/a/b/chromedriver-mac-x64.zip").unwrap(),
            "chromedriver-mac-x64"
        );
        // First dot wins, matching the original filename convention.
        assert_eq!(
            archive_stem("https://example.com/chromedriver.tar.gz").unwrap(),
            "chromedriver"
        );
        assert_eq!(archive_stem("https://example.com/plain").unwrap(), "plain");
    }

    #[test]
    fn archive_stem_rejects_urls_without_a_filename() {
        assert!(archive_stem("").is_err());
    }
}
