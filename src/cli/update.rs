//! Update command - replace the running binary with the latest release.

use crate::cli::output;
use crate::core::update::{Outcome, Updater};
use crate::error::Result;

/// Check for a newer release and install it.
pub fn execute() -> Result<()> {
    let updater = Updater::from_env()?;

    output::progress("Checking for updates");
    let release = updater.check();
    output::progress_done(release.is_ok());
    let release = release?;

    output::field("Current version", updater.current());
    output::field("Latest version", release.version());

    match updater.apply(&release)? {
        Outcome::UpToDate(_) => output::success("already up to date"),
        Outcome::Updated { from, to } => {
            output::success(&format!("updated v{} → v{}", from, to));
        }
    }
    Ok(())
}
