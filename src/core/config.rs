//! Configuration file management.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. `~/.hazy/config.yaml` (written with defaults on first run)
//! 2. `HAZYCTL_*` environment variables
//! 3. command-line flags
//!
//! The loaded [`Config`] is passed explicitly to every command; nothing reads
//! it from global state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Header written above the generated default config.
const DEFAULT_HEADER: &str = "\
# hazyctl configuration.
# Every key can be overridden by an environment variable named HAZYCTL_ plus
# the upper-cased key path, e.g. HAZYCTL_EXPORT_OUTPUT. Flags win over both.
";

/// Tool configuration stored in `~/.hazy/config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Azure subscription passed to the Azure CLI credential
    pub azure_subscription: String,
    /// Defaults for `secret <provider> migrate`
    pub migrate: MigrateConfig,
    /// Defaults for `secret <provider> export`
    pub export: ExportConfig,
}

/// Migration defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    pub source: String,
    pub destination: String,
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Vault to export
    pub name: String,
    /// Output file; the single canonical key for the export path
    pub output: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            output: constants::DEFAULT_EXPORT_OUTPUT.to_string(),
        }
    }
}

/// A configurable setting, addressable from file, environment and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    AzureSubscription,
    MigrateSource,
    MigrateDestination,
    ExportName,
    ExportOutput,
}

impl Key {
    pub const ALL: [Key; 5] = [
        Key::AzureSubscription,
        Key::MigrateSource,
        Key::MigrateDestination,
        Key::ExportName,
        Key::ExportOutput,
    ];

    /// Dotted path in the YAML file.
    pub fn path(self) -> &'static str {
        match self {
            Key::AzureSubscription => "azure_subscription",
            Key::MigrateSource => "migrate.source",
            Key::MigrateDestination => "migrate.destination",
            Key::ExportName => "export.name",
            Key::ExportOutput => "export.output",
        }
    }

    /// Command-line flag that overrides this key.
    pub fn flag(self) -> &'static str {
        match self {
            Key::AzureSubscription => "--subscription",
            Key::MigrateSource => "--source",
            Key::MigrateDestination => "--destination",
            Key::ExportName => "--name",
            Key::ExportOutput => "--output",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Key::AzureSubscription => "Azure subscription",
            Key::MigrateSource => "source vault",
            Key::MigrateDestination => "destination vault",
            Key::ExportName => "vault name",
            Key::ExportOutput => "output path",
        }
    }

    /// Environment variable name: prefix plus the upper-cased,
    /// underscore-joined key path.
    pub fn env_var(self) -> String {
        format!(
            "{}{}",
            constants::ENV_PREFIX,
            self.path().to_uppercase().replace('.', "_")
        )
    }
}

impl Config {
    /// Default config file path (`~/.hazy/config.yaml`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HomeNotFound` if no home directory can be resolved.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load the config at `path`, writing the defaults first if it is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the default
    /// file cannot be written, or an existing file cannot be parsed.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, writing defaults");
            Self::default().save(path)?;
        }
        Self::load(path)
    }

    /// Load and parse the config at `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file is a valid, all-defaults config.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Write the config to `path`, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CreateDir`, `ConfigError::Serialize` or
    /// `ConfigError::Write`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let body = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        let contents = format!("{}{}", DEFAULT_HEADER, body);
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Apply `HAZYCTL_*` overrides from the process environment.
    pub fn with_env(mut self) -> Self {
        self.apply_env(|name| std::env::var(name).ok());
        self
    }

    /// Apply overrides from `lookup`, keyed by [`Key::env_var`].
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// wipe a file setting.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in Key::ALL {
            let var = key.env_var();
            if let Some(value) = lookup(&var).filter(|v| !v.is_empty()) {
                debug!(key = key.path(), env = %var, "config overridden from environment");
                *self.value_mut(key) = value;
            }
        }
    }

    /// Current value for `key` (file + environment).
    pub fn value(&self, key: Key) -> &str {
        match key {
            Key::AzureSubscription => &self.azure_subscription,
            Key::MigrateSource => &self.migrate.source,
            Key::MigrateDestination => &self.migrate.destination,
            Key::ExportName => &self.export.name,
            Key::ExportOutput => &self.export.output,
        }
    }

    fn value_mut(&mut self, key: Key) -> &mut String {
        match key {
            Key::AzureSubscription => &mut self.azure_subscription,
            Key::MigrateSource => &mut self.migrate.source,
            Key::MigrateDestination => &mut self.migrate.destination,
            Key::ExportName => &mut self.export.name,
            Key::ExportOutput => &mut self.export.output,
        }
    }

    /// Resolve `key`, letting a non-empty flag win over the config value.
    pub fn resolve(&self, key: Key, flag: Option<&str>) -> Option<String> {
        flag.filter(|f| !f.is_empty())
            .or_else(|| Some(self.value(key)).filter(|v| !v.is_empty()))
            .map(str::to_string)
    }

    /// Like [`Config::resolve`], but an empty result is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming every way to supply the value.
    pub fn require(&self, key: Key, flag: Option<&str>) -> Result<String> {
        self.resolve(key, flag).ok_or_else(|| {
            ConfigError::Missing {
                what: key.describe(),
                flag: key.flag(),
                env: key.env_var(),
                key: key.path(),
            }
            .into()
        })
    }
}
