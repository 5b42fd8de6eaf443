//! Secret providers.
//!
//! Providers form a closed set. Names map to variants through the
//! [`PROVIDERS`] table; each variant knows how to build a [`SecretStore`]
//! bound to one vault.

pub mod azure;

use tracing::debug;

use crate::core::store::SecretStore;
use crate::error::Result;

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Azure Key Vault
    Azure,
}

/// Provider name table, as accepted on the command line.
pub const PROVIDERS: &[(&str, Provider)] = &[("azure", Provider::Azure)];

/// Settings shared by every vault client of one invocation.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    /// Cloud subscription / account scope, if any
    pub subscription: Option<String>,
}

impl Provider {
    /// Look up a provider by name.
    pub fn lookup(name: &str) -> Option<Self> {
        PROVIDERS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, p)| *p)
    }

    /// Parse a provider name, for use as a clap value parser.
    pub fn parse(name: &str) -> std::result::Result<Self, String> {
        Self::lookup(name).ok_or_else(|| {
            let known: Vec<&str> = PROVIDERS.iter().map(|(n, _)| *n).collect();
            format!("provider {} not found (available: {})", name, known.join(", "))
        })
    }

    pub fn name(self) -> &'static str {
        PROVIDERS
            .iter()
            .find(|(_, p)| *p == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Build a client for `vault`, acquiring fresh credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a malformed vault reference and
    /// `CredentialError` if no credential can be obtained.
    pub fn connect(self, ctx: &ProviderContext, vault: &str) -> Result<Box<dyn SecretStore>> {
        debug!(provider = self.name(), vault, "connecting to vault");
        match self {
            Provider::Azure => Ok(Box::new(azure::connect(ctx, vault)?)),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
