//! Secret commands.
//!
//! Migrate and export secrets of one provider's vaults.

mod export;
mod migrate;

use crate::cli::SecretAction;
use crate::core::config::{Config, Key};
use crate::core::provider::{Provider, ProviderContext};
use crate::error::Result;

/// Dispatch a `secret <provider>` action.
pub fn execute(
    config: &Config,
    provider: Provider,
    subscription: Option<&str>,
    action: SecretAction,
) -> Result<()> {
    let ctx = ProviderContext {
        subscription: config.resolve(Key::AzureSubscription, subscription),
    };

    match action {
        SecretAction::Migrate {
            source,
            destination,
        } => migrate::execute(config, provider, &ctx, source.as_deref(), destination.as_deref()),
        SecretAction::Export { name, output } => {
            export::execute(config, provider, &ctx, name.as_deref(), output.as_deref())
        }
    }
}
