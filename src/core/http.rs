//! Shared HTTP client construction.

use reqwest::blocking::Client;

use crate::core::constants;
use crate::error::{Error, Result};

/// User-agent sent on every request.
pub fn user_agent() -> String {
    format!("{}/{}", constants::BIN_NAME, constants::VERSION)
}

/// Build a blocking client with the crate's user agent and default timeouts.
///
/// # Errors
///
/// Returns `Error::Http` if the TLS backend cannot be initialized.
pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}
