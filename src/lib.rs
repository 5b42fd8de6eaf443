//! hazyctl - migrate and export secrets between cloud key vaults.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secret        # secret <provider> migrate | export
//! │   ├── version       # Build metadata
//! │   ├── update        # Self-update
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.hazy/config.yaml + HAZYCTL_* overrides
//!     ├── domain/       # Secret model
//!     ├── store/        # SecretStore trait + in-memory store
//!     ├── provider/     # Provider table
//!     │   └── azure     # Key Vault REST client + credential chain
//!     ├── transfer/     # Enumerate, migrate, export
//!     └── update/       # Release check, verify, extract, replace
//! ```

pub mod cli;
pub mod core;
pub mod error;
