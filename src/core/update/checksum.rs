//! SHA-256 verification of downloaded release assets.

use sha2::{Digest, Sha256};

use crate::error::{Result, UpdateError};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Pull the digest for `asset` out of a `.sha256` file.
///
/// Accepts the `sha256sum` layout (`<hex>  <name>`, optionally `*<name>`)
/// as well as a bare digest.
pub fn expected_digest(contents: &str, asset: &str) -> Result<String> {
    let mut bare = None;
    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut fields = line.split_whitespace();
        let digest = fields.next().unwrap_or_default();
        match fields.next() {
            Some(name) if name.trim_start_matches('*') == asset => {
                return Ok(digest.to_ascii_lowercase());
            }
            Some(_) => continue,
            None => bare = bare.or(Some(digest.to_ascii_lowercase())),
        }
    }

    bare.filter(|d| d.len() == 64 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| {
            UpdateError::Release(format!("no checksum for {} in checksum file", asset)).into()
        })
}

/// Compare `bytes` against `expected`.
///
/// # Errors
///
/// Returns `UpdateError::Integrity` on mismatch.
pub fn verify(bytes: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    if actual != expected.to_ascii_lowercase() {
        return Err(UpdateError::Integrity {
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}
