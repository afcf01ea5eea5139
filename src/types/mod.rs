//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account and User state
//! - `money`: Coin denominations and engine limits
//! - `journal`: Log entries, receipts, and coin rejections
//! - `error`: Error types for the teller engine

pub mod account;
pub mod error;
pub mod journal;
pub mod money;

pub use account::{is_valid_pincode, Account, User};
pub use error::{Result, TellerError};
pub use journal::{
    CoinRejectReason, CoinRejection, PinUpdateEntry, Receipt, TransactionEntry, TransactionKind,
    TransferReceipt,
};
pub use money::{is_coin_multiple, Denomination, Limits};
