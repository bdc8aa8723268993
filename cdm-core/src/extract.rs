//! Pulls the driver binary out of a downloaded zip archive.

use std::fs::{self, File, Permissions};
use std::io;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use cdm_common::error::{CdmError, Result};
use tracing::debug;
use zip::read::ZipArchive;
use zip::result::ZipError;

/// Result of looking for the driver entry inside the archive. A missing entry
/// is a distinct outcome rather than an implicit success, so the caller
/// decides how to react.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Extracted(PathBuf),
    EntryMissing,
}

/// Extracts the single entry `entry_name` from `archive_path` into
/// `staging_dir` and forces its permission bits to 0755, regardless of the
/// mode stored in the archive.
pub fn extract_driver_binary(
    archive_path: &Path,
    staging_dir: &Path,
    entry_name: &str,
) -> Result<ExtractOutcome> {
    let file = File::open(archive_path).map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to open archive {}: {e}",
            archive_path.display()
        ))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to open ZIP {}: {e}",
            archive_path.display()
        ))
    })?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            debug!(
                "Entry '{entry_name}' not present in {}",
                archive_path.display()
            );
            return Ok(ExtractOutcome::EntryMissing);
        }
        Err(e) => {
            return Err(CdmError::Filesystem(format!(
                "Error reading ZIP {}: {e}",
                archive_path.display()
            )))
        }
    };

    let target_path = match entry.enclosed_name() {
        Some(p) => staging_dir.join(p),
        None => {
            return Err(CdmError::Filesystem(format!(
                "Unsafe entry name '{}' in {}",
                entry.name(),
                archive_path.display()
            )))
        }
    };

    if let Some(parent) = target_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CdmError::Filesystem(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let mut out_file = File::create(&target_path).map_err(|e| {
        CdmError::Filesystem(format!(
            "Failed to create file {}: {e}",
            target_path.display()
        ))
    })?;
    io::copy(&mut entry, &mut out_file)?;
    drop(out_file);

    #[cfg(unix)]
    fs::set_permissions(&target_path, Permissions::from_mode(0o755))?;

    debug!("Extracted '{entry_name}' to {}", target_path.display());
    Ok(ExtractOutcome::Extracted(target_path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn write_archive(dir: &Path, entries: &[(&str, u32)]) -> PathBuf {
        let archive_path = dir.join("chromedriver-linux64.zip");
        let mut writer = ZipWriter::new(File::create(&archive_path).unwrap());
        for (name, mode) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default().unix_permissions(*mode))
                .unwrap();
            writer.write_all(b"#!/bin/sh\nexit 0\n").unwrap();
        }
        writer.finish().unwrap();
        archive_path
    }

    #[test]
    fn extracts_the_named_entry_into_the_staging_dir() {
        let staging = TempDir::new().unwrap();
        let archive = write_archive(
            staging.path(),
            &[("chromedriver-linux64/chromedriver", 0o644)],
        );

        let outcome = extract_driver_binary(
            &archive,
            staging.path(),
            "chromedriver-linux64/chromedriver",
        )
        .unwrap();

        let expected = staging.path().join("chromedriver-linux64/chromedriver");
        assert_eq!(outcome, ExtractOutcome::Extracted(expected.clone()));
        assert!(expected.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn extracted_binary_is_0755_regardless_of_stored_mode() {
        let staging = TempDir::new().unwrap();
        let archive = write_archive(
            staging.path(),
            &[("chromedriver-linux64/chromedriver", 0o600)],
        );

        extract_driver_binary(
            &archive,
            staging.path(),
            "chromedriver-linux64/chromedriver",
        )
        .unwrap();

        let mode = fs::metadata(staging.path().join("chromedriver-linux64/chromedriver"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn missing_entry_reports_entry_missing() {
        let staging = TempDir::new().unwrap();
        let archive = write_archive(staging.path(), &[("some-other-folder/chromedriver", 0o755)]);

        let outcome = extract_driver_binary(
            &archive,
            staging.path(),
            "chromedriver-linux64/chromedriver",
        )
        .unwrap();

        assert_eq!(outcome, ExtractOutcome::EntryMissing);
        assert!(!staging
            .path()
            .join("chromedriver-linux64/chromedriver")
            .exists());
    }

    #[test]
    fn unreadable_archive_is_a_filesystem_error() {
        let staging = TempDir::new().unwrap();
        let bogus = staging.path().join("not-a-zip.zip");
        fs::write(&bogus, b"definitely not a zip").unwrap();

        let err =
            extract_driver_binary(&bogus, staging.path(), "chromedriver-linux64/chromedriver")
                .unwrap_err();
        assert!(matches!(err, CdmError::Filesystem(_)), "{err}");
    }
}
