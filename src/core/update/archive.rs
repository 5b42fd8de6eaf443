//! Release archive extraction.

use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::core::constants::BIN_NAME;
use crate::error::{Result, UpdateError};

/// Archive formats release assets ship in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// Detect the format from an asset file name.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::UnsupportedFormat` for any other extension.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(Self::TarGz)
        } else if name.ends_with(".zip") {
            Ok(Self::Zip)
        } else {
            Err(UpdateError::UnsupportedFormat(name.to_string()).into())
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

/// Name of the executable member for the current platform.
pub fn binary_name() -> &'static str {
    if cfg!(windows) {
        "hazyctl.exe"
    } else {
        BIN_NAME
    }
}

fn is_binary(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(n) if n == BIN_NAME || n == "hazyctl.exe"
    )
}

/// Extract the hazyctl executable from an in-memory archive.
///
/// Only the member's file name is matched, so a binary nested in a
/// top-level directory is still found.
///
/// # Errors
///
/// Returns `UpdateError::BinaryNotFound` when no member matches and
/// `UpdateError::Release` when the archive cannot be read.
pub fn extract_binary(bytes: &[u8], format: ArchiveFormat) -> Result<Vec<u8>> {
    match format {
        ArchiveFormat::TarGz => extract_tar_gz(bytes),
        ArchiveFormat::Zip => extract_zip(bytes),
    }
}

fn corrupt(e: impl std::fmt::Display) -> UpdateError {
    UpdateError::Release(format!("corrupt archive: {}", e))
}

fn extract_tar_gz(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().map_err(corrupt)?.into_owned();
        if is_binary(&path) {
            let mut out = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut out).map_err(corrupt)?;
            return Ok(out);
        }
    }
    Err(UpdateError::BinaryNotFound(binary_name()).into())
}

fn extract_zip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(corrupt)?;
        if !file.is_file() || !is_binary(Path::new(file.name())) {
            continue;
        }
        let mut out = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut out).map_err(corrupt)?;
        return Ok(out);
    }
    Err(UpdateError::BinaryNotFound(binary_name()).into())
}
