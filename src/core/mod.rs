//! Core business logic module
//!
//! This module contains the components behind every teller operation:
//! - `engine` - Operation orchestration and business rules
//! - `directory` - User and account storage with uniqueness rules
//! - `auth` - Login checks and the lockout state machine
//! - `journal` - Append-only logs and the daily withdrawal counter
//! - `clock` - Injectable time source

pub mod auth;
pub mod clock;
pub mod directory;
pub mod engine;
pub mod journal;

pub use auth::Authenticator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::Directory;
pub use engine::TellerEngine;
pub use journal::{DailyWithdrawals, PinUpdateLog, TransactionLog};
