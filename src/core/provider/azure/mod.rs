//! Azure Key Vault provider.
//!
//! Talks to the Key Vault data-plane REST API directly. Tokens come from the
//! credential chain in [`credential`]: a pre-issued token, a service
//! principal from the environment, or the Azure CLI.
//!
//! ## Usage
//!
//! ```bash
//! az login
//! hazyctl secret azure migrate --source old-kv --destination new-kv -s <subscription>
//! hazyctl secret azure export -n old-kv -o secrets.json
//! ```

mod client;
pub mod credential;
mod wire;

pub use client::{KeyVaultClient, API_VERSION};
pub use credential::Credential;

use reqwest::Url;

use super::ProviderContext;
use crate::error::{ConfigError, Result};

/// DNS suffix of public-cloud vaults.
pub const VAULT_SUFFIX: &str = "vault.azure.net";

/// Build a client for `vault` using the environment's credential chain.
pub fn connect(ctx: &ProviderContext, vault: &str) -> Result<KeyVaultClient> {
    let url = vault_url(vault)?;
    let credential = Credential::from_env(ctx.subscription.as_deref());
    KeyVaultClient::new(url, &credential)
}

/// Resolve a vault name or URL to the vault's base URL.
///
/// A bare name becomes `https://{name}.vault.azure.net`. A URL is used as
/// given; `http://` is only accepted for localhost.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for names with characters Key Vault does
/// not allow, or for URLs with a rejected scheme.
pub fn vault_url(vault: &str) -> Result<Url> {
    let vault = vault.trim();
    let invalid = |reason: &str| ConfigError::Invalid {
        what: "vault",
        value: vault.to_string(),
        reason: reason.to_string(),
    };

    if vault.contains("://") {
        let url = Url::parse(vault).map_err(|e| invalid(&e.to_string()))?;
        let local = matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"));
        return match url.scheme() {
            "https" => Ok(url),
            "http" if local => Ok(url),
            "http" => Err(invalid("insecure http is only allowed for localhost").into()),
            other => Err(invalid(&format!("unsupported scheme {}", other)).into()),
        };
    }

    if vault.is_empty() || !vault.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid("vault names may only contain letters, digits and dashes").into());
    }

    Url::parse(&format!("https://{}.{}", vault, VAULT_SUFFIX))
        .map_err(|e| invalid(&e.to_string()).into())
}
