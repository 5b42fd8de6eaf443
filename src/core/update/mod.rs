//! Self-update.
//!
//! A linear pipeline: check the latest release, download the platform
//! archive and its `.sha256`, verify, extract the binary, then swap it in.
//! Any failing stage aborts the update with the installed binary untouched.

mod archive;
mod checksum;
mod release;

pub use archive::{binary_name, extract_binary, ArchiveFormat};
pub use checksum::{expected_digest, sha256_hex, verify};
pub use release::{download, latest, Release};

use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::{constants, http};
use crate::error::{Result, UpdateError};

/// Go-style platform labels used in release asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            other => other,
        };
        Self { os, arch }
    }

    pub fn format(self) -> ArchiveFormat {
        if self.os == "windows" {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    /// `hazyctl_{version}_{os}_{arch}.{ext}`
    pub fn asset_name(self, version: &str) -> String {
        format!(
            "{}_{}_{}_{}.{}",
            constants::BIN_NAME,
            version,
            self.os,
            self.arch,
            self.format().extension()
        )
    }
}

/// Result of an update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate(String),
    Updated { from: String, to: String },
}

/// Self-update pipeline.
pub struct Updater {
    http: Client,
    api_url: String,
    download_base: String,
    current: String,
    platform: Platform,
    target: Option<PathBuf>,
}

impl Updater {
    /// Updater for the running binary, honoring the release host overrides.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Ok(Self {
            http: http::client()?,
            api_url: var(constants::RELEASE_API_ENV)
                .unwrap_or_else(|| constants::RELEASE_API.to_string()),
            download_base: var(constants::RELEASE_DOWNLOAD_ENV)
                .unwrap_or_else(|| constants::RELEASE_DOWNLOAD.to_string()),
            current: constants::VERSION.to_string(),
            platform: Platform::current(),
            target: None,
        })
    }

    /// Updater against explicit endpoints.
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        download_base: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            download_base: download_base.into(),
            current: constants::VERSION.to_string(),
            platform: Platform::current(),
            target: None,
        }
    }

    pub fn current_version(mut self, version: impl Into<String>) -> Self {
        self.current = version.into();
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Install into `path` instead of replacing the running executable.
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    /// Version of the running binary.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Fetch the latest release metadata.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::Release` if the release host cannot be queried.
    pub fn check(&self) -> Result<Release> {
        latest(&self.http, &self.api_url)
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// See [`Updater::check`] and [`Updater::apply`].
    pub fn run(&self) -> Result<Outcome> {
        let release = self.check()?;
        self.apply(&release)
    }

    /// Install `release` unless it is the running version.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::Release` for download failures,
    /// `UpdateError::Integrity` on checksum mismatch,
    /// `UpdateError::UnsupportedFormat`/`BinaryNotFound` for bad archives and
    /// `UpdateError::Replace` if the new binary cannot be installed.
    pub fn apply(&self, release: &Release) -> Result<Outcome> {
        let version = release.version().to_string();
        if version == self.current {
            info!(version = %version, "already up to date");
            return Ok(Outcome::UpToDate(version));
        }

        let asset = self.platform.asset_name(&version);
        let format = ArchiveFormat::from_name(&asset)?;
        let base = format!("{}/v{}", self.download_base.trim_end_matches('/'), version);
        info!(from = %self.current, to = %version, asset = %asset, "updating");

        let archive = download(&self.http, &format!("{}/{}", base, asset))?;
        let sums = download(&self.http, &format!("{}/{}.sha256", base, asset))?;
        let sums = String::from_utf8_lossy(&sums);
        verify(&archive, &expected_digest(&sums, &asset)?)?;
        debug!(asset = %asset, "checksum verified");

        let binary = extract_binary(&archive, format)?;
        match &self.target {
            Some(path) => install_at(&binary, path)?,
            None => replace_running(&binary)?,
        }

        Ok(Outcome::Updated {
            from: self.current.clone(),
            to: version,
        })
    }
}

fn replace_err(e: impl std::fmt::Display) -> UpdateError {
    UpdateError::Replace(e.to_string())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Swap the running executable for `binary`.
fn replace_running(binary: &[u8]) -> Result<()> {
    let dir = tempfile::tempdir().map_err(replace_err)?;
    let staged = dir.path().join(binary_name());
    std::fs::write(&staged, binary).map_err(replace_err)?;
    make_executable(&staged).map_err(replace_err)?;
    self_replace::self_replace(&staged).map_err(replace_err)?;
    Ok(())
}

/// Write `binary` beside `target`, then rename it over `target`.
fn install_at(binary: &[u8], target: &Path) -> Result<()> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| replace_err(format!("invalid target {}", target.display())))?;
    let staged = target.with_file_name(format!(".{}.new", name));
    std::fs::write(&staged, binary).map_err(replace_err)?;
    make_executable(&staged).map_err(replace_err)?;
    if let Err(e) = std::fs::rename(&staged, target) {
        let _ = std::fs::remove_file(&staged);
        return Err(replace_err(e).into());
    }
    Ok(())
}
