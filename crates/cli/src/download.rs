//! Font Awesome release download with an on-disk cache.

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use reqwest::blocking::get;

/// Latest known Font Awesome Free release.
pub const LATEST_FA_VERSION: &str = "6.2.1";

fn release_url(version: &str) -> String {
    format!("https://use.fontawesome.com/releases/v{version}/fontawesome-free-{version}-web.zip")
}

/// File name component of a download URL, ignoring query and fragment.
fn archive_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

pub fn download_latest(out_dir: &Path) -> Result<PathBuf> {
    download_version(LATEST_FA_VERSION, out_dir)
}

pub fn download_version(version: &str, out_dir: &Path) -> Result<PathBuf> {
    download_url(&release_url(version), out_dir)
}

/// Download `url` into `{out_dir}/fa-subset/{archive_name}`.
///
/// Idempotent: when the target file already exists it is returned as-is and
/// no request is made.
pub fn download_url(url: &str, out_dir: &Path) -> Result<PathBuf> {
    let target = out_dir.join("fa-subset").join(archive_name(url));
    if let Some(parent) = target.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if target.exists() {
        log::debug!("using cached archive {}", target.display());
        return Ok(target);
    }

    log::info!("downloading {url}");
    let response = get(url).with_context(|| format!("Failed to fetch {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("HTTP {status} for {url}");
    }

    let bytes = response.bytes()?;
    write(&target, &bytes).with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn archive_name_ignores_query_and_fragment() {
        assert_eq!(
            archive_name("https://use.fontawesome.com/releases/v6.2.1/fontawesome-free-6.2.1-web.zip"),
            "fontawesome-free-6.2.1-web.zip"
        );
        assert_eq!(archive_name("https://example.com/a/b.zip?token=x#frag"), "b.zip");
    }

    #[test]
    fn release_url_embeds_the_version_twice() {
        assert_eq!(
            release_url("6.2.1"),
            "https://use.fontawesome.com/releases/v6.2.1/fontawesome-free-6.2.1-web.zip"
        );
    }

    #[test]
    fn existing_archive_is_returned_without_a_request() {
        let tmp = tempfile::tempdir().unwrap();
        let cached = tmp.path().join("fa-subset").join("archive.zip");
        fs::create_dir_all(cached.parent().unwrap()).unwrap();
        fs::write(&cached, "cached bytes").unwrap();

        // The host does not resolve; reaching the network would fail
        let result = download_url("https://invalid.invalid/releases/archive.zip", tmp.path());

        assert_eq!(result.unwrap(), cached);
        assert_eq!(fs::read_to_string(&cached).unwrap(), "cached bytes");
    }
}
