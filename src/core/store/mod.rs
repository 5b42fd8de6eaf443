//! Secret store abstraction.
//!
//! Everything that talks to a vault goes through [`SecretStore`], a narrow
//! list / get / set / delete interface. The transfer engine
//! ([`crate::core::transfer`]) only ever sees this trait, so it runs the same
//! against a real Key Vault client or the in-memory [`MemoryStore`].
//!
//! ## Adding a New Provider
//!
//! 1. Implement `SecretStore` for the provider's client
//! 2. Add a variant to [`crate::core::provider::Provider`]
//! 3. Register its name in the provider table

use crate::core::domain::{Secret, SecretSummary};
use crate::error::Result;

mod memory;

pub use memory::MemoryStore;

/// One page of a secret listing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Secrets on this page, without values
    pub items: Vec<SecretSummary>,
    /// Opaque cursor for the next page, `None` on the last page
    pub next: Option<String>,
}

/// A vault holding named secrets.
///
/// One store is bound to exactly one vault.
pub trait SecretStore {
    /// Human-readable vault identifier, used in logs and error context.
    fn vault(&self) -> &str;

    /// Fetch one page of secret summaries.
    ///
    /// Pass `None` for the first page, then each page's `next` cursor.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Fetch` if the page cannot be retrieved.
    fn list_page(&self, cursor: Option<&str>) -> Result<Page>;

    /// Fetch the current version of a secret, value included.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Fetch` if the secret cannot be retrieved.
    fn get(&self, name: &str) -> Result<Secret>;

    /// Create or overwrite a secret with the given value, content type,
    /// enabled / expiry / not-before attributes and tags.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Write` if the vault rejects the write.
    fn set(&self, secret: &Secret) -> Result<()>;

    /// Delete a secret.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Write` if the vault rejects the delete.
    fn delete(&self, name: &str) -> Result<()>;
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn vault(&self) -> &str {
        (**self).vault()
    }

    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        (**self).list_page(cursor)
    }

    fn get(&self, name: &str) -> Result<Secret> {
        (**self).get(name)
    }

    fn set(&self, secret: &Secret) -> Result<()> {
        (**self).set(secret)
    }

    fn delete(&self, name: &str) -> Result<()> {
        (**self).delete(name)
    }
}
