//! Error types.
//!
//! One top-level [`Error`] composed of per-domain enums. Every variant carries
//! enough context (vault, secret name, path) to be printed as-is by `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by every command.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build http client: {0}")]
    Http(#[source] reqwest::Error),
}

/// Configuration load, parse and bootstrap failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot determine home directory for config")]
    HomeNotFound,

    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("invalid {what} '{value}': {reason}")]
    Invalid {
        what: &'static str,
        value: String,
        reason: String,
    },

    #[error("missing {what}: pass {flag}, set {env}, or set `{key}` in the config file")]
    Missing {
        what: &'static str,
        flag: &'static str,
        env: String,
        key: &'static str,
    },
}

/// Credential acquisition failures.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no Azure credential available: {0}")]
    Unavailable(String),

    #[error("token request failed: {0}")]
    TokenRequest(String),
}

/// Failures talking to a remote vault.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to {context}: {source}")]
    Fetch {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to {context}: {source}")]
    Write {
        context: String,
        #[source]
        source: ApiError,
    },
}

impl RemoteError {
    pub fn fetch(context: impl Into<String>, source: ApiError) -> Self {
        Self::Fetch {
            context: context.into(),
            source,
        }
    }

    pub fn write(context: impl Into<String>, source: ApiError) -> Self {
        Self::Write {
            context: context.into(),
            source,
        }
    }
}

/// Transport-level API failure. Raw response bodies are never included.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unauthorized (status {0})")]
    Unauthorized(u16),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("server error (status {0})")]
    Server(u16),

    #[error(
        "unexpected response: status {status}{}",
        code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
    )]
    UnexpectedStatus { status: u16, code: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Export file failures.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create output file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode secrets: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Self-update failures.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("release check failed: {0}")]
    Release(String),

    #[error("checksum mismatch!\nexpected: {expected}\nactual:   {actual}")]
    Integrity { expected: String, actual: String },

    #[error("unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("no {0} binary found in archive")]
    BinaryNotFound(&'static str),

    #[error("failed to replace binary: {0}")]
    Replace(String),
}

pub type Result<T> = std::result::Result<T, Error>;
