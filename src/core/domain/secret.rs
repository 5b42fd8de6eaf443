//! Secret types.
//!
//! A [`Secret`] is a point-in-time snapshot of one vault secret, value
//! included. A [`SecretSummary`] is what a listing returns: everything but the
//! value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zeroize::Zeroize;

/// Secret tags, kept sorted so exports are stable.
pub type Tags = BTreeMap<String, String>;

/// Lifecycle attributes of a secret.
///
/// `enabled`, `expires_at` and `not_before` are copied on migration;
/// `created_at` and `updated_at` are informational and assigned by the vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A secret listing entry (no value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSummary {
    pub name: String,
    pub content_type: Option<String>,
    pub attributes: SecretAttributes,
    pub tags: Tags,
}

/// A secret with its value, as read from a vault.
///
/// This is also the record format of the export file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub attributes: SecretAttributes,
    #[serde(default)]
    pub tags: Tags,
    /// Full identifier assigned by the vault
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Secret {
    /// Create a secret with no metadata
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            content_type: None,
            attributes: SecretAttributes::default(),
            tags: Tags::new(),
            id: None,
            version: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// The listing view of this secret
    pub fn summary(&self) -> SecretSummary {
        SecretSummary {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            attributes: self.attributes.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Whether `other` carries the same migratable content.
    ///
    /// Compares name, value, content type, tags and the enabled / expiry /
    /// not-before attributes. Vault-assigned metadata is ignored.
    pub fn same_content(&self, other: &Secret) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.content_type == other.content_type
            && self.tags == other.tags
            && self.attributes.enabled == other.attributes.enabled
            && self.attributes.expires_at == other.attributes.expires_at
            && self.attributes.not_before == other.attributes.not_before
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
