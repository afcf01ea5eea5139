//! User directory module
//!
//! This module provides the `Directory` struct which maintains the state of
//! all users and their accounts and enforces bank-wide identifier rules.
//!
//! The Directory is responsible for:
//! - Registering users and accounts with uniqueness guarantees
//! - Resolving account numbers to their owning user
//! - Providing sorted account listings for output

use crate::types::{Account, TellerError, User};
use log::debug;
use std::collections::HashMap;

/// Holds every user and indexes their accounts by number
///
/// The Directory maintains an in-memory map of usernames to users plus a
/// secondary index from account number to owning username. Both usernames
/// and account numbers are unique bank-wide; the index makes account
/// lookups independent of which user owns the account.
#[derive(Debug)]
pub struct Directory {
    /// Map of usernames to users (each owning its accounts)
    users: HashMap<String, User>,

    /// Map of account numbers to the owning username
    index: HashMap<String, String>,
}

impl Directory {
    /// Create a new Directory with no users
    pub fn new() -> Self {
        Directory {
            users: HashMap::new(),
            index: HashMap::new(),
        }
    }

    /// Register a new user together with any accounts it already carries
    ///
    /// Validation is atomic: if the username or any carried account number
    /// collides with existing state (or with another account carried by the
    /// same user), nothing is registered.
    ///
    /// # Arguments
    ///
    /// * `user` - The user to register, with zero or more accounts attached
    ///
    /// # Errors
    ///
    /// Returns `UserExists` for a duplicate username and `AccountExists`
    /// for a duplicate account number.
    pub fn register(&mut self, user: User) -> Result<(), TellerError> {
        if self.users.contains_key(&user.username) {
            return Err(TellerError::user_exists(&user.username));
        }

        let mut seen: Vec<&str> = Vec::new();
        for account in user.accounts() {
            let number = account.account_number.as_str();
            if self.index.contains_key(number) || seen.contains(&number) {
                return Err(TellerError::account_exists(number));
            }
            seen.push(number);
        }

        for account in user.accounts() {
            self.index
                .insert(account.account_number.clone(), user.username.clone());
        }
        debug!(
            "registered user {} with {} account(s)",
            user.username,
            user.accounts().len()
        );
        self.users.insert(user.username.clone(), user);

        Ok(())
    }

    /// Attach a new account to an existing user
    ///
    /// # Arguments
    ///
    /// * `username` - Owner of the new account
    /// * `account` - The account to attach
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for an unknown owner and `AccountExists` when
    /// the number is already registered anywhere in the bank.
    pub fn add_account(&mut self, username: &str, account: Account) -> Result<(), TellerError> {
        if self.index.contains_key(&account.account_number) {
            return Err(TellerError::account_exists(&account.account_number));
        }
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| TellerError::user_not_found(username))?;

        debug!(
            "attached account {} to user {}",
            account.account_number, username
        );
        self.index
            .insert(account.account_number.clone(), username.to_string());
        user.add_account(account);

        Ok(())
    }

    /// Look up an account and its owner by account number
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` when no account has this number.
    pub fn find(&self, account_number: &str) -> Result<(&User, &Account), TellerError> {
        let username = self
            .index
            .get(account_number)
            .ok_or_else(|| TellerError::account_not_found(account_number))?;

        // Safety: the index only ever points at registered users and the
        // accounts they carry; both maps are mutated together.
        let user = self
            .users
            .get(username)
            .expect("account index references a registered user");
        let account = user
            .account(account_number)
            .expect("account index references an attached account");

        Ok((user, account))
    }

    /// Resolve an account number to its owner's name and a mutable account
    ///
    /// The username comes back owned so the caller can keep it while the
    /// mutable borrow of the account is live.
    pub(crate) fn resolve_mut(
        &mut self,
        account_number: &str,
    ) -> Result<(String, &mut Account), TellerError> {
        let username = self
            .index
            .get(account_number)
            .ok_or_else(|| TellerError::account_not_found(account_number))?
            .clone();

        // Safety: same invariant as in `find`.
        let account = self
            .users
            .get_mut(&username)
            .expect("account index references a registered user")
            .account_mut(account_number)
            .expect("account index references an attached account");

        Ok((username, account))
    }

    /// Look up a user by name
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Whether any user owns an account with this number
    pub fn contains_account(&self, account_number: &str) -> bool {
        self.index.contains_key(account_number)
    }

    /// Iterate every account with its owner, in display order
    ///
    /// Users come out sorted by username and each user's accounts in
    /// insertion order, so listings are deterministic.
    pub fn all(&self) -> impl Iterator<Item = (&User, &Account)> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
            .into_iter()
            .flat_map(|user| user.accounts().iter().map(move |account| (user, account)))
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
