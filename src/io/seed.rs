//! Seed file loading
//!
//! This module builds the starting [`Directory`] either from a CSV seed
//! file or from the built-in demonstration set. The CSV format is one
//! account per row with columns: username, account_number, pin, balance.
//! Rows for the same username accumulate accounts under one user.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) abort the load
//! - A record that parses but fails validation aborts with its line number,
//!   so a bad seed never produces a partially populated bank

use crate::core::Directory;
use crate::types::{is_valid_pincode, Account, TellerError, User};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Seed record structure for deserialization
///
/// The balance is kept as a string so parse errors can be reported with
/// the offending value and line instead of a generic serde message.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedRecord {
    pub username: String,
    pub account_number: String,
    pub pin: String,
    pub balance: String,
}

/// Validate a seed record and build the account it describes
///
/// # Arguments
///
/// * `record` - The deserialized row
/// * `line` - 1-based file line for error reporting
///
/// # Returns
///
/// The owning username and the account, ready for registration.
///
/// # Errors
///
/// Returns `SeedInvalid` when the username or account number is empty,
/// the PIN is not four digits, or the balance is unparsable or negative.
pub fn convert_seed_record(
    record: SeedRecord,
    line: u64,
) -> Result<(String, Account), TellerError> {
    if record.username.is_empty() {
        return Err(TellerError::seed_invalid(line, "username must not be empty"));
    }
    if record.account_number.is_empty() {
        return Err(TellerError::seed_invalid(
            line,
            "account number must not be empty",
        ));
    }
    if !is_valid_pincode(&record.pin) {
        return Err(TellerError::seed_invalid(
            line,
            "PIN must be exactly four digits",
        ));
    }

    let balance = Decimal::from_str(&record.balance).map_err(|_| {
        TellerError::seed_invalid(line, &format!("invalid balance '{}'", record.balance))
    })?;
    if balance < Decimal::ZERO {
        return Err(TellerError::seed_invalid(
            line,
            "balance must not be negative",
        ));
    }

    let account = Account::new(&record.account_number, &record.pin, balance);
    Ok((record.username, account))
}

/// Load a directory from a seed CSV file
///
/// The reader trims whitespace from all fields. Usernames repeat across
/// rows to give one user several accounts; account numbers must be unique
/// across the whole file.
///
/// # Arguments
///
/// * `path` - Path to the seed CSV file
///
/// # Errors
///
/// Returns `IoError` when the file cannot be read, `ParseError` for
/// malformed CSV, and `SeedInvalid` (with the line number) for records
/// that fail validation or collide with earlier ones.
pub fn load_directory(path: &Path) -> Result<Directory, TellerError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut directory = Directory::new();
    for (i, result) in reader.deserialize::<SeedRecord>().enumerate() {
        // Row 1 is the header
        let line = i as u64 + 2;
        let record = result?;
        let (username, account) = convert_seed_record(record, line)?;

        if directory.user(&username).is_none() {
            directory.register(User::new(&username))?;
        }
        directory
            .add_account(&username, account)
            .map_err(|e| TellerError::seed_invalid(line, &e.to_string()))?;
    }

    Ok(directory)
}

/// The built-in demonstration seed
///
/// Two users, three accounts: alice with 1001 (PIN 1234, 500.00) and
/// 1002 (PIN 5678, 1500.00), bob with 2001 (PIN 4321, 800.00).
pub fn builtin_directory() -> Directory {
    let mut directory = Directory::new();

    let mut alice = User::new("alice");
    alice.add_account(Account::new("1001", "1234", Decimal::new(50000, 2)));
    alice.add_account(Account::new("1002", "5678", Decimal::new(150000, 2)));

    let mut bob = User::new("bob");
    bob.add_account(Account::new("2001", "4321", Decimal::new(80000, 2)));

    // Safety: the built-in seed is statically unique.
    directory.register(alice).expect("built-in seed registers");
    directory.register(bob).expect("built-in seed registers");

    directory
}
