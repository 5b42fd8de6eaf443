//! Azure credential chain.
//!
//! Sources, in order of preference:
//!
//! 1. `HAZYCTL_AZURE_ACCESS_TOKEN`: a pre-issued bearer token
//! 2. `AZURE_TENANT_ID` + `AZURE_CLIENT_ID` + `AZURE_CLIENT_SECRET`: a
//!    service principal, exchanged at the Azure AD token endpoint
//! 3. the Azure CLI (`az account get-access-token`)

use reqwest::blocking::Client;
use serde::Deserialize;
use std::process::{Command, Stdio};
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::error::{CredentialError, Result};

/// Resource the vault tokens are issued for.
pub const VAULT_RESOURCE: &str = "https://vault.azure.net";

/// Pre-issued token variable.
pub const ACCESS_TOKEN_ENV: &str = "HAZYCTL_AZURE_ACCESS_TOKEN";

/// Default Azure AD authority.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Where a vault token comes from.
#[derive(Clone)]
pub enum Credential {
    /// Bearer token supplied as-is
    AccessToken(String),

    /// Service principal, client-credentials grant
    ClientSecret {
        authority: String,
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },

    /// `az account get-access-token`
    AzureCli { subscription: Option<String> },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
            Self::ClientSecret {
                authority,
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ClientSecret")
                .field("authority", authority)
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
            Self::AzureCli { subscription } => f
                .debug_struct("AzureCli")
                .field("subscription", subscription)
                .finish(),
        }
    }
}

impl Zeroize for Credential {
    fn zeroize(&mut self) {
        match self {
            Self::AccessToken(token) => token.zeroize(),
            Self::ClientSecret { client_secret, .. } => client_secret.zeroize(),
            Self::AzureCli { .. } => {}
        }
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
}

impl Credential {
    /// Pick a credential from the process environment.
    pub fn from_env(subscription: Option<&str>) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), subscription)
    }

    /// Pick a credential from variables provided by `lookup`.
    pub fn from_lookup<F>(lookup: F, subscription: Option<&str>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = var(ACCESS_TOKEN_ENV) {
            return Self::AccessToken(token);
        }

        if let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
            var("AZURE_TENANT_ID"),
            var("AZURE_CLIENT_ID"),
            var("AZURE_CLIENT_SECRET"),
        ) {
            let authority = var("AZURE_AUTHORITY_HOST")
                .unwrap_or_else(|| DEFAULT_AUTHORITY.to_string())
                .trim_end_matches('/')
                .to_string();
            return Self::ClientSecret {
                authority,
                tenant_id,
                client_id,
                client_secret,
            };
        }

        Self::AzureCli {
            subscription: subscription.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccessToken(_) => "access-token",
            Self::ClientSecret { .. } => "client-secret",
            Self::AzureCli { .. } => "azure-cli",
        }
    }

    /// Acquire a bearer token for Key Vault.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::TokenRequest` if the token endpoint rejects
    /// the request, or `CredentialError::Unavailable` if the Azure CLI is
    /// missing or not logged in.
    pub fn token(&self, http: &Client) -> Result<String> {
        debug!(credential = self.name(), "acquiring vault token");
        match self {
            Self::AccessToken(token) => Ok(token.clone()),
            Self::ClientSecret {
                authority,
                tenant_id,
                client_id,
                client_secret,
            } => client_secret_token(http, authority, tenant_id, client_id, client_secret),
            Self::AzureCli { subscription } => cli_token(subscription.as_deref()),
        }
    }
}

fn client_secret_token(
    http: &Client,
    authority: &str,
    tenant_id: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String> {
    let url = format!("{}/{}/oauth2/v2.0/token", authority, tenant_id);
    let scope = format!("{}/.default", VAULT_RESOURCE);
    trace!(url = %url, client_id, "requesting client-credentials token");

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope.as_str()),
        ])
        .send()
        .map_err(|e| CredentialError::TokenRequest(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let reason = response
            .json::<TokenErrorResponse>()
            .ok()
            .map(|e| e.error_description.unwrap_or(e.error))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "no error description".to_string());
        return Err(
            CredentialError::TokenRequest(format!("status {}: {}", status, reason)).into(),
        );
    }

    let token: TokenResponse = response.json().map_err(|e| {
        CredentialError::TokenRequest(format!("malformed token response: {}", e))
    })?;
    Ok(token.access_token)
}

fn cli_token(subscription: Option<&str>) -> Result<String> {
    let az = which::which("az").map_err(|_| {
        CredentialError::Unavailable(
            "Azure CLI (az) not found; install it and run `az login`, or set AZURE_TENANT_ID, \
             AZURE_CLIENT_ID and AZURE_CLIENT_SECRET"
                .to_string(),
        )
    })?;

    let mut cmd = Command::new(az);
    cmd.args([
        "account",
        "get-access-token",
        "--resource",
        VAULT_RESOURCE,
        "--output",
        "json",
    ]);
    if let Some(subscription) = subscription {
        cmd.args(["--subscription", subscription]);
    }

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| CredentialError::Unavailable(format!("failed to run az: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CredentialError::Unavailable(format!(
            "az account get-access-token failed: {}",
            stderr.trim()
        ))
        .into());
    }

    parse_cli_token(&output.stdout)
}

/// Extract the token from `az account get-access-token --output json`.
fn parse_cli_token(stdout: &[u8]) -> Result<String> {
    let token: CliToken = serde_json::from_slice(stdout)
        .map_err(|e| CredentialError::Unavailable(format!("unexpected az output: {}", e)))?;
    Ok(token.access_token)
}
