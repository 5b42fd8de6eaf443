//! JSON snapshot export.

use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::enumerate;
use crate::core::domain::Secret;
use crate::core::store::SecretStore;
use crate::error::{ExportError, Result};

/// Read every secret of `store` into memory, in enumeration order.
///
/// # Errors
///
/// Returns the first `RemoteError::Fetch`; no partial result is returned.
pub fn collect<S: SecretStore + ?Sized>(store: &S) -> Result<Vec<Secret>> {
    enumerate(store).collect()
}

/// Write `secrets` to `path` as a 2-space indented JSON array, in one write.
///
/// # Errors
///
/// Returns `ExportError::Create` or `ExportError::Write` on file errors.
pub fn write_json(secrets: &[Secret], path: &Path) -> Result<()> {
    let mut body = serde_json::to_vec_pretty(secrets).map_err(ExportError::Encode)?;
    body.push(b'\n');

    let mut file = open_private(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&body)
        .and_then(|_| file.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = body.len(), "wrote export file");
    Ok(())
}

/// Create or truncate `path`, readable by the owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .mode(0o600)
        .open(path)?;

    // An existing file keeps its old mode on open; tighten it too.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::File::create(path)
}

/// Read an export file back.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read or `Error::Json` if it is
/// not a valid export.
pub fn read_json(path: &Path) -> Result<Vec<Secret>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Snapshot every secret of `store` into `path`.
///
/// The whole set is held in memory before anything is written, so a fetch
/// failure never leaves a truncated file behind.
///
/// # Returns
///
/// The number of exported secrets.
///
/// # Errors
///
/// Returns `RemoteError::Fetch` for enumeration failures and `ExportError`
/// for file failures.
pub fn export<S: SecretStore + ?Sized>(store: &S, path: &Path) -> Result<usize> {
    info!(vault = store.vault(), path = %path.display(), "exporting secrets");
    let secrets = collect(store)?;
    write_json(&secrets, path)?;
    info!(count = secrets.len(), "export complete");
    Ok(secrets.len())
}
