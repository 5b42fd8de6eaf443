//! Secret transfer engine.
//!
//! - [`enumerate`]: page through a vault, fetching each secret's value
//! - [`migrate`]: copy every secret from one vault into another
//! - [`export`]: snapshot every secret of a vault into a JSON file
//!
//! All three work on a point-in-time listing with no transactionality:
//! secrets changed in the source while a run is paging may or may not be
//! picked up.

mod enumerate;
mod export;
mod migrate;

pub use enumerate::{enumerate, Secrets};
pub use export::{collect, export, read_json, write_json};
pub use migrate::{migrate, MigrationReport};
