//! Key Vault data-plane client.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use tracing::{debug, trace};
use zeroize::Zeroize;

use super::credential::Credential;
use super::wire::{ErrorEnvelope, SecretBundle, SecretList, SetSecretParameters};
use crate::core::domain::Secret;
use crate::core::http;
use crate::core::store::{Page, SecretStore};
use crate::error::{ApiError, RemoteError, Result};

/// Key Vault REST API version.
pub const API_VERSION: &str = "7.4";

/// Listing page size (the service maximum).
const PAGE_SIZE: &str = "25";

/// Client bound to a single vault.
///
/// Holds one bearer token, acquired when the client is built.
pub struct KeyVaultClient {
    http: Client,
    base_url: Url,
    vault: String,
    token: String,
}

impl std::fmt::Debug for KeyVaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyVaultClient")
            .field("vault", &self.vault)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Drop for KeyVaultClient {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

impl KeyVaultClient {
    /// Build a client for the vault at `base_url`, acquiring a token from
    /// `credential`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if no token can be obtained.
    pub fn new(base_url: Url, credential: &Credential) -> Result<Self> {
        let http = http::client()?;
        let token = credential.token(&http)?;
        debug!(vault = %base_url, credential = credential.name(), "vault client ready");
        Ok(Self::from_parts(http, base_url, token))
    }

    /// Build a client with an already-issued bearer token.
    pub fn with_token(base_url: Url, token: impl Into<String>) -> Result<Self> {
        Ok(Self::from_parts(http::client()?, base_url, token.into()))
    }

    fn from_parts(http: Client, base_url: Url, token: String) -> Self {
        let vault = base_url.host_str().unwrap_or(base_url.as_str()).to_string();
        Self {
            http,
            base_url,
            vault,
            token,
        }
    }

    /// URL of `/secrets[/{name}]` with the API version applied.
    fn secrets_url(&self, name: Option<&str>) -> std::result::Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::Malformed(format!("vault url cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().push("secrets");
            if let Some(name) = name {
                segments.push(name);
            }
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// Accept a `nextLink` only if it points back at this vault.
    fn next_link_url(&self, link: &str) -> std::result::Result<Url, ApiError> {
        let url =
            Url::parse(link).map_err(|e| ApiError::Malformed(format!("bad nextLink: {}", e)))?;
        if url.origin() != self.base_url.origin() {
            return Err(ApiError::Malformed(format!(
                "nextLink points outside the vault: {}",
                url.origin().ascii_serialization()
            )));
        }
        if url.query_pairs().any(|(k, _)| k == "api-version") {
            return Ok(url);
        }
        let mut url = url;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> std::result::Result<Response, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .map_err(ApiError::Network)?;
        check_status(response, what)
    }

    fn fetch_page(&self, cursor: Option<&str>) -> std::result::Result<Page, ApiError> {
        let url = match cursor {
            Some(link) => self.next_link_url(link)?,
            None => {
                let mut url = self.secrets_url(None)?;
                url.query_pairs_mut().append_pair("maxresults", PAGE_SIZE);
                url
            }
        };
        trace!(url = %url, "listing secrets");

        let list: SecretList = self
            .send(self.http.get(url), "secrets")?
            .json()
            .map_err(ApiError::Network)?;

        let items = list
            .value
            .into_iter()
            .filter_map(|item| {
                let id = item.id.clone();
                let summary = item.into_summary();
                if summary.is_none() {
                    debug!(id = %id, "skipping listing entry with unrecognized id");
                }
                summary
            })
            .collect();
        let next = list.next_link.filter(|l| !l.is_empty());
        Ok(Page { items, next })
    }

    fn fetch_secret(&self, name: &str) -> std::result::Result<Secret, ApiError> {
        let url = self.secrets_url(Some(name))?;
        let bundle: SecretBundle = self
            .send(self.http.get(url), name)?
            .json()
            .map_err(ApiError::Network)?;
        bundle
            .into_secret()
            .ok_or_else(|| ApiError::Malformed(format!("unrecognized secret id for {}", name)))
    }

    fn put_secret(&self, secret: &Secret) -> std::result::Result<(), ApiError> {
        let url = self.secrets_url(Some(&secret.name))?;
        let body = SetSecretParameters::from_secret(secret);
        self.send(self.http.put(url).json(&body), &secret.name)?;
        Ok(())
    }

    fn delete_secret(&self, name: &str) -> std::result::Result<(), ApiError> {
        let url = self.secrets_url(Some(name))?;
        self.send(self.http.delete(url), name)?;
        Ok(())
    }
}

/// Map non-success statuses to [`ApiError`]. Response bodies are only read
/// for the service error code.
fn check_status(response: Response, what: &str) -> std::result::Result<Response, ApiError> {
    let status = response.status().as_u16();
    match status {
        200..=299 => Ok(response),
        401 | 403 => Err(ApiError::Unauthorized(status)),
        404 => Err(ApiError::NotFound(what.to_string())),
        429 => Err(ApiError::RateLimited),
        500..=599 => Err(ApiError::Server(status)),
        _ => {
            let code = response.json::<ErrorEnvelope>().ok().and_then(|e| e.error.code);
            Err(ApiError::UnexpectedStatus { status, code })
        }
    }
}

impl SecretStore for KeyVaultClient {
    fn vault(&self) -> &str {
        &self.vault
    }

    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        self.fetch_page(cursor)
            .map_err(|e| {
                RemoteError::fetch(format!("get secrets page from {}", self.vault), e).into()
            })
    }

    fn get(&self, name: &str) -> Result<Secret> {
        self.fetch_secret(name)
            .map_err(|e| {
                RemoteError::fetch(format!("get secret {} from {}", name, self.vault), e).into()
            })
    }

    fn set(&self, secret: &Secret) -> Result<()> {
        self.put_secret(secret).map_err(|e| {
            RemoteError::write(format!("set secret {} in {}", secret.name, self.vault), e).into()
        })
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.delete_secret(name)
            .map_err(|e| {
                RemoteError::write(format!("delete secret {} from {}", name, self.vault), e).into()
            })
    }
}
