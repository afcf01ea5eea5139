//! Teller Engine Library
//! # Overview
//!
//! This library implements a coin-denominated bank teller: users authenticate
//! with an account number and PIN, then deposit, withdraw and transfer funds
//! under denomination, daily-cap and minimum-balance rules.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, User, journal entries, money rules)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Operation orchestration and limit enforcement
//!   - [`core::directory`] - User registry with a bank-wide account index
//!   - [`core::auth`] - PIN checks and the failed-attempt lockout
//!   - [`core::journal`] - Append-only transaction and PIN update logs
//! - [`io`] - Seed file loading and journal export
//! - [`report`] - Read-only aggregations over the transaction journal
//! - [`console`] - The interactive menu surface
//!
//! # Money Rules
//!
//! Cash moves only in the accepted coin denominations:
//!
//! - **Deposit**: Any mix of 0.05, 0.10 and 0.25 coins; other values are
//!   rejected coin by coin
//! - **Withdrawal**: Same coins, capped at 0.90 per account per day, and the
//!   balance never drops below 0.05
//! - **Transfer**: Any positive multiple of 0.05, minimum balance preserved
//!   on the source account
//!
//! # Account States
//!
//! Each account maintains:
//! - `balance`: Current funds, opened at the 0.05 minimum
//! - `locked`: Set after three failed logins; cleared only by an admin
//! - `frozen`: Admin display flag toggled from the admin menu
//! - `failed_attempts`: Consecutive wrong-PIN logins so far

// Module declarations
pub mod cli;
pub mod console;
pub mod core;
pub mod io;
pub mod report;
pub mod types;

pub use console::TellerConsole;
pub use core::{Authenticator, Directory, TellerEngine};
pub use io::{builtin_directory, load_directory, write_pin_updates_csv, write_transactions_csv};
pub use types::{
    Account, Denomination, Limits, PinUpdateEntry, Receipt, Result, TellerError,
    TransactionEntry, TransactionKind, TransferReceipt, User,
};
