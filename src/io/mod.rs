//! I/O module
//!
//! Handles seed file loading and journal export.
//!
//! # Components
//!
//! - `seed` - Seed CSV loading and the built-in demonstration set
//! - `export` - CSV export of the transaction and PIN update journals

pub mod export;
pub mod seed;

pub use export::{write_pin_updates_csv, write_transactions_csv};
pub use seed::{builtin_directory, convert_seed_record, load_directory, SeedRecord};
