//! Release host access.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Latest-release metadata, as served by the release host.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

impl Release {
    /// Version with any leading `v` stripped.
    pub fn version(&self) -> &str {
        self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name)
    }
}

/// Fetch the latest release metadata from `url`.
///
/// # Errors
///
/// Returns `UpdateError::Release` for network failures, non-success statuses
/// and unparseable bodies.
pub fn latest(http: &Client, url: &str) -> Result<Release> {
    debug!(url, "checking latest release");
    let response = http
        .get(url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .map_err(|e| UpdateError::Release(format!("failed to reach {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        let msg = format!("{} returned status {}", url, status.as_u16());
        return Err(UpdateError::Release(msg).into());
    }

    let release: Release = response
        .json()
        .map_err(|e| UpdateError::Release(format!("malformed release metadata: {}", e)))?;
    if release.version().is_empty() {
        return Err(UpdateError::Release("release has an empty tag".to_string()).into());
    }
    Ok(release)
}

/// Download `url` fully into memory.
///
/// # Errors
///
/// Returns `UpdateError::Release` for network failures and non-success
/// statuses.
pub fn download(http: &Client, url: &str) -> Result<Vec<u8>> {
    debug!(url, "downloading");
    let response = http
        .get(url)
        .send()
        .map_err(|e| UpdateError::Release(format!("failed to download {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        let msg = format!("download of {} failed with status {}", url, status.as_u16());
        return Err(UpdateError::Release(msg).into());
    }

    let bytes = response
        .bytes()
        .map_err(|e| UpdateError::Release(format!("failed to read {}: {}", url, e)))?;
    Ok(bytes.to_vec())
}
