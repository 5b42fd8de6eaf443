//! Key Vault REST payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Secret, SecretAttributes, SecretSummary, Tags};

/// `SecretAttributes` as Key Vault encodes them (Unix seconds).
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub exp: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub nbf: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing, with = "chrono::serde::ts_seconds_option")]
    pub updated: Option<DateTime<Utc>>,
}

impl Attributes {
    /// Only the attributes a caller may set.
    pub fn settable(attrs: &SecretAttributes) -> Self {
        Self {
            enabled: attrs.enabled,
            exp: attrs.expires_at,
            nbf: attrs.not_before,
            created: None,
            updated: None,
        }
    }
}

impl From<Attributes> for SecretAttributes {
    fn from(a: Attributes) -> Self {
        Self {
            enabled: a.enabled,
            expires_at: a.exp,
            not_before: a.nbf,
            created_at: a.created,
            updated_at: a.updated,
        }
    }
}

/// One entry of `GET /secrets`.
#[derive(Debug, Deserialize)]
pub(super) struct SecretItem {
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,
}

/// Response of `GET /secrets`.
#[derive(Debug, Deserialize)]
pub(super) struct SecretList {
    #[serde(default)]
    pub value: Vec<SecretItem>,
    #[serde(default, rename = "nextLink")]
    pub next_link: Option<String>,
}

/// Response of `GET /secrets/{name}`.
#[derive(Debug, Deserialize)]
pub(super) struct SecretBundle {
    #[serde(default)]
    pub value: Option<String>,
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,
}

/// Body of `PUT /secrets/{name}`.
#[derive(Serialize)]
pub(super) struct SetSecretParameters<'a> {
    pub value: &'a str,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<&'a str>,
    pub attributes: Attributes,
    pub tags: &'a Tags,
}

impl<'a> SetSecretParameters<'a> {
    pub fn from_secret(secret: &'a Secret) -> Self {
        Self {
            value: &secret.value,
            content_type: secret.content_type.as_deref(),
            attributes: Attributes::settable(&secret.attributes),
            tags: &secret.tags,
        }
    }
}

/// Error envelope returned on non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
}

/// Split a secret identifier into `(name, version)`.
///
/// Identifiers look like `https://{vault}/secrets/{name}[/{version}]`.
pub(super) fn parse_secret_id(id: &str) -> Option<(String, Option<String>)> {
    let (_, rest) = id.split_once("/secrets/")?;
    let mut parts = rest.trim_end_matches('/').split('/');
    let name = parts.next().filter(|n| !n.is_empty())?.to_string();
    let version = parts.next().filter(|v| !v.is_empty()).map(str::to_string);
    Some((name, version))
}

impl SecretItem {
    pub fn into_summary(self) -> Option<SecretSummary> {
        let (name, _) = parse_secret_id(&self.id)?;
        Some(SecretSummary {
            name,
            content_type: self.content_type,
            attributes: self.attributes.into(),
            tags: self.tags.unwrap_or_default(),
        })
    }
}

impl SecretBundle {
    pub fn into_secret(self) -> Option<Secret> {
        let (name, version) = parse_secret_id(&self.id)?;
        let mut secret = Secret::new(name, self.value.unwrap_or_default());
        secret.content_type = self.content_type;
        secret.attributes = self.attributes.into();
        secret.tags = self.tags.unwrap_or_default();
        secret.id = Some(self.id);
        secret.version = version;
        Some(secret)
    }
}
