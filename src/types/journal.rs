//! Journal entry types for the Teller Engine
//!
//! This module defines the records appended to the transaction and PIN
//! update logs, plus the receipts handed back to callers after a
//! balance-changing operation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Movement classes recorded in the transaction log
///
/// Transfers produce two entries, one per side, so every entry describes
/// exactly one account's balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Coins paid in at the counter
    Deposit,

    /// Coins paid out at the counter
    Withdrawal,

    /// Amount leaving an account as part of a transfer
    TransferOut,

    /// Amount arriving at an account as part of a transfer
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind increases the account balance
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }

    /// Stable lowercase label used in exports and listings
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::TransferOut => "transfer_out",
            TransactionKind::TransferIn => "transfer_in",
        }
    }
}

/// One appended record of a completed balance change
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    /// Account whose balance changed
    pub account_number: String,

    /// Owner of that account at the time of the operation
    pub username: String,

    /// When the engine applied the change
    pub timestamp: DateTime<Utc>,

    /// Movement class
    pub kind: TransactionKind,

    /// Amount moved, always positive; direction comes from `kind`
    pub amount: Decimal,
}

/// One appended record of a completed PIN change
///
/// Old and new values are stored as entered. Hardening the credential
/// trail is out of scope for this system.
#[derive(Debug, Clone, PartialEq)]
pub struct PinUpdateEntry {
    /// Account whose PIN changed
    pub account_number: String,

    /// Owner of that account
    pub username: String,

    /// When the engine applied the change
    pub timestamp: DateTime<Utc>,

    /// PIN before the change
    pub old_pin: String,

    /// PIN after the change
    pub new_pin: String,
}

/// Why a single tendered coin was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinRejectReason {
    /// Negative values are never tendered
    Negative,

    /// The value matches no accepted coin
    UnknownDenomination,

    /// Paying out this coin would push the day's total past the cap
    DailyCapExceeded,

    /// Paying out this coin would leave less than the required minimum
    WouldBreachMinimum,

    /// Paying out this coin would take more than the account holds
    ExceedsBalance,
}

impl fmt::Display for CoinRejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            CoinRejectReason::Negative => "negative amounts cannot be tendered",
            CoinRejectReason::UnknownDenomination => "not an accepted coin denomination",
            CoinRejectReason::DailyCapExceeded => "would exceed the daily withdrawal limit",
            CoinRejectReason::WouldBreachMinimum => {
                "would leave the balance below the required minimum"
            }
            CoinRejectReason::ExceedsBalance => "exceeds the available balance",
        };
        write!(f, "{message}")
    }
}

/// A coin the engine refused, with the value as offered
#[derive(Debug, Clone, PartialEq)]
pub struct CoinRejection {
    /// The offered value
    pub coin: Decimal,

    /// Why it was refused
    pub reason: CoinRejectReason,
}

/// Outcome of a deposit or withdrawal
///
/// `amount` is the accepted total; `rejected` lists every coin that was
/// turned away. An operation that accepts nothing fails with an error
/// instead of returning a zero receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub account_number: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub amount: Decimal,

    /// Balance after the operation
    pub balance: Decimal,

    /// Coins refused during this operation, in the order offered
    pub rejected: Vec<CoinRejection>,
}

/// Outcome of a transfer between two accounts
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub from_account: String,
    pub from_username: String,

    /// Source balance after the transfer
    pub from_balance: Decimal,

    pub to_account: String,
    pub to_username: String,

    /// Destination balance after the transfer
    pub to_balance: Decimal,

    /// Shared timestamp of both journal entries
    pub timestamp: DateTime<Utc>,

    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::deposit(TransactionKind::Deposit, true, "deposit")]
    #[case::withdrawal(TransactionKind::Withdrawal, false, "withdrawal")]
    #[case::transfer_out(TransactionKind::TransferOut, false, "transfer_out")]
    #[case::transfer_in(TransactionKind::TransferIn, true, "transfer_in")]
    fn test_kind_direction_and_label(
        #[case] kind: TransactionKind,
        #[case] credit: bool,
        #[case] label: &str,
    ) {
        assert_eq!(kind.is_credit(), credit);
        assert_eq!(kind.label(), label);
    }

    #[rstest]
    #[case::negative(CoinRejectReason::Negative, "negative amounts cannot be tendered")]
    #[case::unknown(
        CoinRejectReason::UnknownDenomination,
        "not an accepted coin denomination"
    )]
    #[case::cap(
        CoinRejectReason::DailyCapExceeded,
        "would exceed the daily withdrawal limit"
    )]
    fn test_reject_reason_display(#[case] reason: CoinRejectReason, #[case] expected: &str) {
        assert_eq!(reason.to_string(), expected);
    }
}
