//! Constants used throughout hazyctl.
//!
//! Centralizes magic strings and configuration values.

/// Binary name, also the member name looked up inside release archives.
pub const BIN_NAME: &str = "hazyctl";

/// Config directory relative to HOME (~/.hazy).
pub const CONFIG_DIR: &str = ".hazy";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment overrides (`HAZYCTL_EXPORT_OUTPUT`, ...).
pub const ENV_PREFIX: &str = "HAZYCTL_";

/// Default export file written by `secret <provider> export`.
pub const DEFAULT_EXPORT_OUTPUT: &str = "secrets.json";

/// Log filter environment variable.
pub const LOG_ENV: &str = "HAZYCTL_LOG";

/// Set to `json` for JSON-formatted logs.
pub const LOG_FORMAT_ENV: &str = "HAZYCTL_LOG_FORMAT";

/// Latest-release metadata endpoint.
pub const RELEASE_API: &str = "https://api.github.com/repos/hazyforge/hazyctl/releases/latest";

/// Base URL for release asset downloads (`{base}/v{version}/{asset}`).
pub const RELEASE_DOWNLOAD: &str = "https://github.com/hazyforge/hazyctl/releases/download";

/// Overrides [`RELEASE_API`].
pub const RELEASE_API_ENV: &str = "HAZYCTL_RELEASE_API";

/// Overrides [`RELEASE_DOWNLOAD`].
pub const RELEASE_DOWNLOAD_ENV: &str = "HAZYCTL_RELEASE_DOWNLOAD";

/// Build metadata, stamped by the release pipeline.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit of the build, `none` for local builds.
pub const COMMIT: &str = match option_env!("HAZYCTL_BUILD_COMMIT") {
    Some(c) => c,
    None => "none",
};

/// Build date, `unknown` for local builds.
pub const BUILD_DATE: &str = match option_env!("HAZYCTL_BUILD_DATE") {
    Some(d) => d,
    None => "unknown",
};
