//! Account-related types for the Teller Engine
//!
//! This module defines the Account and User structures holding per-customer
//! state. These are leaf types: they mutate their own fields and know
//! nothing about journals, limits, or other accounts.

use rust_decimal::Decimal;

/// A single bank account
///
/// Represents the current state of one account: its credentials, balance,
/// and the two status flags (lockout from failed logins, administrative
/// freeze). Accounts are always owned by exactly one [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Bank-wide unique account number, immutable once registered
    pub account_number: String,

    /// Four ASCII digits, mutable through the PIN update operation
    pub pincode: String,

    /// Current balance
    ///
    /// Never negative. User-initiated operations additionally never leave
    /// it below the configured minimum; only administrative adjustments
    /// may go under that floor (but still not below zero).
    pub balance: Decimal,

    /// Whether the account is locked out after repeated failed logins
    ///
    /// Once locked, every login attempt is rejected until an administrator
    /// unlocks the account.
    pub locked: bool,

    /// Consecutive failed login attempts since the last success
    ///
    /// Reset to zero on a successful login or an administrative unlock.
    pub failed_attempts: u8,

    /// Administrative freeze marker
    ///
    /// Toggled from the admin console and shown in listings. It does not
    /// gate any operation.
    pub frozen: bool,
}

impl Account {
    /// Create a new unlocked, unfrozen account
    ///
    /// # Arguments
    ///
    /// * `account_number` - Bank-wide unique identifier
    /// * `pincode` - Initial PIN (validated by the caller)
    /// * `balance` - Opening balance
    pub fn new(account_number: &str, pincode: &str, balance: Decimal) -> Self {
        Account {
            account_number: account_number.to_string(),
            pincode: pincode.to_string(),
            balance,
            locked: false,
            failed_attempts: 0,
            frozen: false,
        }
    }

    /// Credit funds to this account
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to add
    ///
    /// # Returns
    ///
    /// `true` if the balance was updated; `false` (and no change) when the
    /// amount is not strictly positive or the decimal representation
    /// cannot land the full amount. Near `Decimal::MAX` scale alignment
    /// rounds small addends away without overflowing, so only an exact
    /// landing counts as success.
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }
        match self.balance.checked_add(amount) {
            Some(updated) if updated - self.balance == amount => {
                self.balance = updated;
                true
            }
            _ => false,
        }
    }

    /// Debit funds from this account
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to remove
    ///
    /// # Returns
    ///
    /// `true` if the balance was updated; `false` (and no change) when the
    /// amount is not strictly positive, exceeds the current balance, or
    /// cannot be represented exactly in the result (same scale rule as
    /// [`Account::deposit`]). Minimum-balance policy is the engine's
    /// concern, not this method's.
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || amount > self.balance {
            return false;
        }
        match self.balance.checked_sub(amount) {
            Some(updated) if self.balance - updated == amount => {
                self.balance = updated;
                true
            }
            _ => false,
        }
    }

    /// Replace the PIN
    ///
    /// Plain setter; format and old-PIN checks happen in the engine.
    pub fn set_pincode(&mut self, new_pin: &str) {
        self.pincode = new_pin.to_string();
    }
}

/// Check that a candidate PIN is exactly four ASCII digits
pub fn is_valid_pincode(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

/// A bank customer owning one or more accounts
///
/// Accounts are stored in insertion order, which listings preserve.
/// Account-number uniqueness is enforced by the directory at registration
/// time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Bank-wide unique username
    pub username: String,

    accounts: Vec<Account>,
}

impl User {
    /// Create a user with no accounts yet
    pub fn new(username: &str) -> Self {
        User {
            username: username.to_string(),
            accounts: Vec::new(),
        }
    }

    /// Append an account to this user
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// All accounts in insertion order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Look up one of this user's accounts by number
    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }

    pub(crate) fn account_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.account_number == account_number)
    }
}
