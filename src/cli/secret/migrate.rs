//! Migrate command - copy every secret of one vault into another.

use crate::cli::output;
use crate::core::config::{Config, Key};
use crate::core::provider::{Provider, ProviderContext};
use crate::core::transfer;
use crate::error::Result;

pub fn execute(
    config: &Config,
    provider: Provider,
    ctx: &ProviderContext,
    source: Option<&str>,
    destination: Option<&str>,
) -> Result<()> {
    let source = config.require(Key::MigrateSource, source)?;
    let destination = config.require(Key::MigrateDestination, destination)?;

    let from = provider.connect(ctx, &source)?;
    let to = provider.connect(ctx, &destination)?;

    let report = transfer::migrate(&from, &to, |secret| {
        output::success(&format!("migrated {}", output::key(&secret.name)));
    })?;

    output::success(&format!(
        "migrated {} secrets from {} to {}",
        report.count(),
        output::path(&source),
        output::path(&destination)
    ));
    Ok(())
}
