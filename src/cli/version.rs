//! Version command.

use crate::cli::output;
use crate::core::constants::{BUILD_DATE, COMMIT, VERSION};
use crate::error::Result;

/// Print build metadata.
pub fn execute() -> Result<()> {
    output::field("Version", VERSION);
    output::field("Git Commit", COMMIT);
    output::field("Build Date", BUILD_DATE);
    Ok(())
}
