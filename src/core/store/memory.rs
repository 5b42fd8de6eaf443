//! In-memory secret store.
//!
//! Keeps secrets in insertion order and pages them with a fixed page size.
//! Failures can be injected per operation to exercise error paths.

use std::cell::{Cell, RefCell};

use super::{Page, SecretStore};
use crate::core::domain::Secret;
use crate::error::{ApiError, RemoteError, Result};

/// Default page size, matching Key Vault's maximum.
const DEFAULT_PAGE_SIZE: usize = 25;

/// Vault held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    page_size: usize,
    secrets: RefCell<Vec<Secret>>,
    versions: Cell<u64>,
    fail_page: Option<usize>,
    fail_get: Option<String>,
    fail_set: Option<String>,
}

impl MemoryStore {
    /// Create an empty store named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            secrets: RefCell::new(Vec::new()),
            versions: Cell::new(0),
            fail_page: None,
            fail_get: None,
            fail_set: None,
        }
    }

    /// Create a store pre-filled with `secrets`, in order.
    pub fn with_secrets(
        name: impl Into<String>,
        secrets: impl IntoIterator<Item = Secret>,
    ) -> Self {
        let store = Self::new(name);
        for secret in secrets {
            store.insert(secret);
        }
        store
    }

    /// Serve listings `size` items at a time (minimum 1).
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Fail when listing the page at `index` (0-based).
    pub fn failing_page(mut self, index: usize) -> Self {
        self.fail_page = Some(index);
        self
    }

    /// Fail when fetching the secret `name`.
    pub fn failing_get(mut self, name: impl Into<String>) -> Self {
        self.fail_get = Some(name.into());
        self
    }

    /// Fail when writing the secret `name`.
    pub fn failing_set(mut self, name: impl Into<String>) -> Self {
        self.fail_set = Some(name.into());
        self
    }

    /// Snapshot of all stored secrets, in order.
    pub fn secrets(&self) -> Vec<Secret> {
        self.secrets.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.secrets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.borrow().is_empty()
    }

    fn insert(&self, mut secret: Secret) {
        let version = self.versions.get() + 1;
        self.versions.set(version);
        secret.version = Some(version.to_string());
        secret.id = Some(format!("memory://{}/secrets/{}/{}", self.name, secret.name, version));

        let mut secrets = self.secrets.borrow_mut();
        match secrets.iter_mut().find(|s| s.name == secret.name) {
            Some(existing) => *existing = secret,
            None => secrets.push(secret),
        }
    }
}

impl SecretStore for MemoryStore {
    fn vault(&self) -> &str {
        &self.name
    }

    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        let start = match cursor {
            None => 0,
            Some(c) => c.parse::<usize>().map_err(|_| {
                RemoteError::fetch(
                    format!("list secrets in {}", self.name),
                    ApiError::Malformed(format!("bad page cursor: {}", c)),
                )
            })?,
        };

        if self.fail_page == Some(start / self.page_size) {
            return Err(RemoteError::fetch(
                format!("get secrets page from {}", self.name),
                ApiError::Server(500),
            )
            .into());
        }

        let secrets = self.secrets.borrow();
        let end = (start + self.page_size).min(secrets.len());
        let items = secrets
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(Secret::summary)
            .collect();
        let next = (end < secrets.len()).then(|| end.to_string());

        Ok(Page { items, next })
    }

    fn get(&self, name: &str) -> Result<Secret> {
        let context = format!("get secret {} from {}", name, self.name);
        if self.fail_get.as_deref() == Some(name) {
            return Err(RemoteError::fetch(context, ApiError::Server(503)).into());
        }

        self.secrets
            .borrow()
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| RemoteError::fetch(context, ApiError::NotFound(name.to_string())).into())
    }

    fn set(&self, secret: &Secret) -> Result<()> {
        if self.fail_set.as_deref() == Some(secret.name.as_str()) {
            return Err(RemoteError::write(
                format!("set secret {} in {}", secret.name, self.name),
                ApiError::Unauthorized(403),
            )
            .into());
        }

        let mut stored = secret.clone();
        stored.attributes.created_at = None;
        stored.attributes.updated_at = None;
        self.insert(stored);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut secrets = self.secrets.borrow_mut();
        let before = secrets.len();
        secrets.retain(|s| s.name != name);
        if secrets.len() == before {
            return Err(RemoteError::write(
                format!("delete secret {} from {}", name, self.name),
                ApiError::NotFound(name.to_string()),
            )
            .into());
        }
        Ok(())
    }
}
