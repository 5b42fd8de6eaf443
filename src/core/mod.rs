//! Core library components.
//!
//! Configuration, the secret model, vault providers, the transfer
//! operations built on top of them, and the self-updater.

pub mod config;
pub mod constants;
pub mod domain;
pub mod http;
pub mod provider;
pub mod store;
pub mod transfer;
pub mod update;
