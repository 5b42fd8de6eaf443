//! Domain types.

mod secret;

pub use secret::{Secret, SecretAttributes, SecretSummary, Tags};
