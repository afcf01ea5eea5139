//! Error types for the Teller Engine
//!
//! This module defines all error types that can occur while serving teller
//! operations. Errors are designed to be descriptive and user-friendly for
//! console output.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: Unknown accounts or users
//! - **Authentication Errors**: Wrong PIN, lockout state
//! - **Validation Errors**: Malformed PINs, bad amounts, duplicate identifiers
//! - **Funds Errors**: Insufficient balance, minimum-balance floor, daily cap
//! - **Seed I/O Errors**: Unreadable or invalid seed files
//!
//! Everything except the seed I/O group is recoverable: the console reports
//! the message and returns to the menu with state unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

/// Convenient result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TellerError>;

/// Main error type for the teller engine
///
/// This enum represents all possible errors that can occur while handling
/// teller operations. Each variant includes relevant context to help
/// diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TellerError {
    /// No account with this number exists anywhere in the bank
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unknown account number
        account: String,
    },

    /// No user with this username exists
    #[error("User {username} not found")]
    UserNotFound {
        /// The unknown username
        username: String,
    },

    /// Account number already registered, possibly under another user
    #[error("Account {account} already exists")]
    AccountExists {
        /// The duplicated account number
        account: String,
    },

    /// Username already registered
    #[error("User {username} already exists")]
    UserExists {
        /// The duplicated username
        username: String,
    },

    /// Wrong PIN while the account still has attempts left
    ///
    /// Carries the attempt count so the console can warn the user how
    /// close they are to lockout.
    #[error("Incorrect PIN (attempt {attempt} of {max})")]
    IncorrectPin {
        /// The failed attempt number, 1-based
        attempt: u8,
        /// Attempts allowed before lockout
        max: u8,
    },

    /// This attempt crossed the threshold and locked the account
    #[error("Account {account} locked after too many failed attempts")]
    AccountLockedOut {
        /// The account that just locked
        account: String,
    },

    /// The account was already locked before this attempt
    ///
    /// Locked attempts are not counted; the state is terminal until an
    /// administrator unlocks the account.
    #[error("Account {account} is locked")]
    AccountLocked {
        /// The locked account
        account: String,
    },

    /// Candidate PIN is not exactly four ASCII digits
    #[error("PIN must be exactly four digits")]
    MalformedPin,

    /// New PIN equals the current one
    #[error("New PIN must differ from the current PIN")]
    PinUnchanged,

    /// Old PIN given during a PIN update does not match
    ///
    /// Distinct from [`TellerError::IncorrectPin`]: a failed update does
    /// not feed the lockout counter.
    #[error("Current PIN does not match for account {account}")]
    PinMismatch {
        /// The account whose PIN update was refused
        account: String,
    },

    /// Every tendered coin was rejected, so there is nothing to deposit
    #[error("No valid coins tendered for account {account}")]
    NoCoinsDeposited {
        /// The target account
        account: String,
    },

    /// Every requested coin was rejected, so there is nothing to pay out
    #[error("No coins could be dispensed for account {account}")]
    NoFundsWithdrawn {
        /// The target account
        account: String,
    },

    /// The day's withdrawal allowance was already used up
    #[error("Daily withdrawal limit of {cap} reached for account {account}")]
    DailyCapReached {
        /// The capped account
        account: String,
        /// The configured daily cap
        cap: Decimal,
    },

    /// Amount must be strictly positive
    #[error("Amount {amount} must be positive")]
    NonPositiveAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Amount cannot be paid out with the accepted coins
    #[error("Amount {amount} is not payable in coins")]
    AmountNotCoinMultiple {
        /// The offending amount
        amount: Decimal,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccountTransfer {
        /// The account given as both ends
        account: String,
    },

    /// Transfer between own accounts referenced an account of another user
    #[error("Accounts {from} and {to} belong to different users")]
    CrossOwnerTransfer {
        /// Source account number
        from: String,
        /// Destination account number
        to: String,
    },

    /// Balance cannot cover the requested amount
    #[error(
        "Insufficient funds for account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// The short account
        account: String,
        /// Available balance
        available: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Operation would leave the account below the required floor
    #[error("Account {account} must retain at least {minimum}")]
    MinimumBalanceBreached {
        /// The constrained account
        account: String,
        /// The configured minimum balance
        minimum: Decimal,
    },

    /// Balance arithmetic could not land the amount exactly
    ///
    /// Near `Decimal::MAX` an addition either overflows outright or has
    /// its addend rounded away during scale alignment. Both outcomes
    /// reject the operation with no balance change.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that could not complete
        operation: String,
        /// The affected account
        account: String,
    },

    /// I/O error occurred while reading a seed file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred while reading a seed file
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Seed record parsed but failed validation
    #[error("Invalid seed record at line {line}: {message}")]
    SeedInvalid {
        /// Line number of the bad record
        line: u64,
        /// What was wrong with it
        message: String,
    },
}

// Conversion from io::Error to TellerError
impl From<std::io::Error> for TellerError {
    fn from(error: std::io::Error) -> Self {
        TellerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to TellerError
impl From<csv::Error> for TellerError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        TellerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TellerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        TellerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(username: &str) -> Self {
        TellerError::UserNotFound {
            username: username.to_string(),
        }
    }

    /// Create an AccountExists error
    pub fn account_exists(account: &str) -> Self {
        TellerError::AccountExists {
            account: account.to_string(),
        }
    }

    /// Create a UserExists error
    pub fn user_exists(username: &str) -> Self {
        TellerError::UserExists {
            username: username.to_string(),
        }
    }

    /// Create an AccountLocked error
    pub fn account_locked(account: &str) -> Self {
        TellerError::AccountLocked {
            account: account.to_string(),
        }
    }

    /// Create an AccountLockedOut error
    pub fn locked_out(account: &str) -> Self {
        TellerError::AccountLockedOut {
            account: account.to_string(),
        }
    }

    /// Create a PinMismatch error
    pub fn pin_mismatch(account: &str) -> Self {
        TellerError::PinMismatch {
            account: account.to_string(),
        }
    }

    /// Create a NoCoinsDeposited error
    pub fn no_coins_deposited(account: &str) -> Self {
        TellerError::NoCoinsDeposited {
            account: account.to_string(),
        }
    }

    /// Create a NoFundsWithdrawn error
    pub fn no_funds_withdrawn(account: &str) -> Self {
        TellerError::NoFundsWithdrawn {
            account: account.to_string(),
        }
    }

    /// Create a DailyCapReached error
    pub fn daily_cap_reached(account: &str, cap: Decimal) -> Self {
        TellerError::DailyCapReached {
            account: account.to_string(),
            cap,
        }
    }

    /// Create a SameAccountTransfer error
    pub fn same_account_transfer(account: &str) -> Self {
        TellerError::SameAccountTransfer {
            account: account.to_string(),
        }
    }

    /// Create a CrossOwnerTransfer error
    pub fn cross_owner_transfer(from: &str, to: &str) -> Self {
        TellerError::CrossOwnerTransfer {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        TellerError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create a MinimumBalanceBreached error
    pub fn minimum_balance_breached(account: &str, minimum: Decimal) -> Self {
        TellerError::MinimumBalanceBreached {
            account: account.to_string(),
            minimum,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        TellerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a SeedInvalid error
    pub fn seed_invalid(line: u64, message: &str) -> Self {
        TellerError::SeedInvalid {
            line,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::account_not_found(
        TellerError::AccountNotFound { account: "1001".to_string() },
        "Account 1001 not found"
    )]
    #[case::user_not_found(
        TellerError::UserNotFound { username: "mallory".to_string() },
        "User mallory not found"
    )]
    #[case::incorrect_pin(
        TellerError::IncorrectPin { attempt: 2, max: 3 },
        "Incorrect PIN (attempt 2 of 3)"
    )]
    #[case::locked_out(
        TellerError::AccountLockedOut { account: "2001".to_string() },
        "Account 2001 locked after too many failed attempts"
    )]
    #[case::account_locked(
        TellerError::AccountLocked { account: "2001".to_string() },
        "Account 2001 is locked"
    )]
    #[case::malformed_pin(TellerError::MalformedPin, "PIN must be exactly four digits")]
    #[case::pin_unchanged(
        TellerError::PinUnchanged,
        "New PIN must differ from the current PIN"
    )]
    #[case::daily_cap(
        TellerError::DailyCapReached { account: "1001".to_string(), cap: Decimal::new(90, 2) },
        "Daily withdrawal limit of 0.90 reached for account 1001"
    )]
    #[case::insufficient_funds(
        TellerError::InsufficientFunds {
            account: "1001".to_string(),
            available: Decimal::new(50, 2),
            requested: Decimal::new(100, 2),
        },
        "Insufficient funds for account 1001: available 0.50, requested 1.00"
    )]
    #[case::minimum_balance(
        TellerError::MinimumBalanceBreached {
            account: "1001".to_string(),
            minimum: Decimal::new(5, 2),
        },
        "Account 1001 must retain at least 0.05"
    )]
    #[case::arithmetic_overflow(
        TellerError::ArithmeticOverflow {
            operation: "deposit".to_string(),
            account: "1001".to_string(),
        },
        "Arithmetic overflow in deposit for account 1001"
    )]
    #[case::not_coin_multiple(
        TellerError::AmountNotCoinMultiple { amount: Decimal::new(7, 2) },
        "Amount 0.07 is not payable in coins"
    )]
    #[case::cross_owner(
        TellerError::CrossOwnerTransfer { from: "1001".to_string(), to: "2001".to_string() },
        "Accounts 1001 and 2001 belong to different users"
    )]
    #[case::parse_error_with_line(
        TellerError::ParseError { line: Some(3), message: "bad field".to_string() },
        "CSV parse error at line 3: bad field"
    )]
    #[case::parse_error_without_line(
        TellerError::ParseError { line: None, message: "bad field".to_string() },
        "CSV parse error: bad field"
    )]
    #[case::seed_invalid(
        TellerError::SeedInvalid { line: 2, message: "PIN must be four digits".to_string() },
        "Invalid seed record at line 2: PIN must be four digits"
    )]
    fn test_error_display(#[case] error: TellerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(
        TellerError::account_not_found("1001"),
        TellerError::AccountNotFound { account: "1001".to_string() }
    )]
    #[case::account_locked(
        TellerError::account_locked("2001"),
        TellerError::AccountLocked { account: "2001".to_string() }
    )]
    #[case::insufficient_funds(
        TellerError::insufficient_funds("1001", Decimal::new(50, 2), Decimal::new(100, 2)),
        TellerError::InsufficientFunds {
            account: "1001".to_string(),
            available: Decimal::new(50, 2),
            requested: Decimal::new(100, 2),
        }
    )]
    #[case::cross_owner(
        TellerError::cross_owner_transfer("1001", "2001"),
        TellerError::CrossOwnerTransfer { from: "1001".to_string(), to: "2001".to_string() }
    )]
    #[case::arithmetic_overflow(
        TellerError::arithmetic_overflow("transfer", "2001"),
        TellerError::ArithmeticOverflow {
            operation: "transfer".to_string(),
            account: "2001".to_string(),
        }
    )]
    #[case::seed_invalid(
        TellerError::seed_invalid(4, "negative balance"),
        TellerError::SeedInvalid { line: 4, message: "negative balance".to_string() }
    )]
    fn test_helper_functions(#[case] result: TellerError, #[case] expected: TellerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: TellerError = io_error.into();
        assert!(matches!(error, TellerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
