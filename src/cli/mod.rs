//! Command-line interface.

pub mod completions;
pub mod output;
pub mod secret;
pub mod update;
pub mod version;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::core::config::Config;
use crate::core::provider::Provider;
use crate::error::Result;

/// hazyctl - cloud key vault helper.
#[derive(Parser)]
#[command(
    name = "hazyctl",
    about = "Migrate and export secrets between cloud key vaults",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ~/.hazy/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Work with secrets in a provider's vaults
    Secret {
        /// Cloud provider (azure)
        #[arg(value_parser = Provider::parse)]
        provider: Provider,

        /// Cloud subscription to operate in
        #[arg(short, long, global = true)]
        subscription: Option<String>,

        #[command(subcommand)]
        action: SecretAction,
    },

    /// Print version, commit and build date
    Version,

    /// Update hazyctl to the latest release
    Update,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Secret subcommands.
#[derive(Subcommand)]
pub enum SecretAction {
    /// Copy every secret from one vault into another
    Migrate {
        /// Vault to read from
        #[arg(long)]
        source: Option<String>,

        /// Vault to write to
        #[arg(long)]
        destination: Option<String>,
    },

    /// Snapshot every secret of a vault into a JSON file
    Export {
        /// Vault to export
        #[arg(short, long)]
        name: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Load the config (bootstrapping it on first run) and apply env overrides.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    debug!(path = %path.display(), "loading config");
    Ok(Config::load_or_init(&path)?.with_env())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;

    match cli.command {
        Command::Secret {
            provider,
            subscription,
            action,
        } => secret::execute(&config, provider, subscription.as_deref(), action),
        Command::Version => version::execute(),
        Command::Update => update::execute(),
        Command::Completions { shell } => completions::execute(shell),
    }
}
