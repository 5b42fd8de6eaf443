//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: paths, secret names, hints
//! - Dimmed: secondary info
//!
//! Everything goes to stdout, errors included; logs go to stderr.

use console::style;
use std::io::{self, Write as IoWrite};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ migrated db-pass`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message (red).
///
/// Example: `✗ missing vault name: ...`
pub fn error(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✗").red(), msg);
    } else {
        println!("✗ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ run: az login`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print a `Label: value` line.
pub fn field(label: &str, value: &str) {
    if colors_enabled() {
        println!("{}: {}", style(label).bold(), value);
    } else {
        println!("{}: {}", label, value);
    }
}

/// Format a path or vault reference in cyan.
pub fn path(p: &str) -> String {
    if colors_enabled() {
        style(p).cyan().to_string()
    } else {
        p.to_string()
    }
}

/// Format a secret name in cyan.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}

/// Start a progress line in the format `Label... `.
///
/// Call `progress_done()` to finish the line.
pub fn progress(label: &str) {
    if colors_enabled() {
        print!("{}... ", style(label).dim());
    } else {
        print!("{}... ", label);
    }
    let _ = io::stdout().flush();
}

/// Finish a progress line with success/failure indicator.
pub fn progress_done(success: bool) {
    let word = if success { "ok" } else { "failed" };
    if !colors_enabled() {
        println!("{}", word);
    } else if success {
        println!("{}", style(word).green());
    } else {
        println!("{}", style(word).red());
    }
}
