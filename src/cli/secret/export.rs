//! Export command - snapshot a vault into a JSON file.

use std::path::Path;

use crate::cli::output;
use crate::core::config::{Config, Key};
use crate::core::constants::DEFAULT_EXPORT_OUTPUT;
use crate::core::provider::{Provider, ProviderContext};
use crate::core::transfer;
use crate::error::Result;

pub fn execute(
    config: &Config,
    provider: Provider,
    ctx: &ProviderContext,
    name: Option<&str>,
    output_path: Option<&str>,
) -> Result<()> {
    let vault = config.require(Key::ExportName, name)?;
    let path = config
        .resolve(Key::ExportOutput, output_path)
        .unwrap_or_else(|| DEFAULT_EXPORT_OUTPUT.to_string());

    let store = provider.connect(ctx, &vault)?;
    let count = transfer::export(&store, Path::new(&path))?;

    output::success(&format!(
        "exported {} secrets to {}",
        count,
        output::path(&path)
    ));
    Ok(())
}
