//! Release archive extraction.

use std::{
    fs::{File, create_dir_all},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use zip::ZipArchive;

/// Extract a zip archive next to itself, into the archive path minus its
/// `.zip` suffix.
///
/// Idempotent: when the target directory already exists, extraction is
/// skipped and the directory is returned as-is.
pub fn unzip(archive: &Path) -> Result<PathBuf> {
    let target = archive.with_extension("");
    if target.exists() {
        log::debug!("using existing directory {}", target.display());
        return Ok(target);
    }

    let file =
        File::open(archive).with_context(|| format!("Failed to open {}", archive.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {}", archive.display()))?;

    create_dir_all(&target)?;
    zip.extract(&target)
        .with_context(|| format!("Failed to extract {}", archive.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    fn write_test_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer.start_file("css/all.css", SimpleFileOptions::default()).unwrap();
        writer.write_all(b".fa-user:before { content: \"\\f007\"; }").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_next_to_the_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("release.zip");
        write_test_zip(&archive);

        let dir = unzip(&archive).unwrap();

        assert_eq!(dir, tmp.path().join("release"));
        assert!(dir.join("css").join("all.css").exists());
    }

    #[test]
    fn existing_directory_skips_extraction() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("release.zip");
        fs::write(&archive, "not a zip at all").unwrap();
        fs::create_dir(tmp.path().join("release")).unwrap();

        // A corrupt archive is never opened when the directory exists
        let dir = unzip(&archive).unwrap();
        assert_eq!(dir, tmp.path().join("release"));
    }
}
