//! Vault-to-vault migration.

use tracing::{debug, info};

use super::enumerate;
use crate::core::domain::Secret;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Outcome of a completed migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Names written to the destination, in enumeration order
    pub migrated: Vec<String>,
}

impl MigrationReport {
    pub fn count(&self) -> usize {
        self.migrated.len()
    }
}

/// Copy every secret of `source` into `destination`.
///
/// Secrets are written in enumeration order with their value, content type,
/// enabled / expiry / not-before attributes and tags. Existing destination
/// secrets with the same name are overwritten. `on_migrated` is called after
/// each successful write.
///
/// # Errors
///
/// Stops at the first `RemoteError::Fetch` from the source or
/// `RemoteError::Write` from the destination. Secrets written before the
/// failure stay in the destination.
pub fn migrate<S, D, F>(source: &S, destination: &D, mut on_migrated: F) -> Result<MigrationReport>
where
    S: SecretStore + ?Sized,
    D: SecretStore + ?Sized,
    F: FnMut(&Secret),
{
    info!(
        source = source.vault(),
        destination = destination.vault(),
        "migrating secrets"
    );

    let mut report = MigrationReport::default();
    for secret in enumerate(source) {
        let secret = secret?;
        debug!(secret = %secret.name, "writing secret to destination");
        destination.set(&secret)?;
        on_migrated(&secret);
        report.migrated.push(secret.name.clone());
    }

    info!(count = report.count(), "migration complete");
    Ok(report)
}
