//! Authentication module
//!
//! This module provides the `Authenticator`, the single owner of the login
//! lockout rules. An account is either unlocked with 0 to 2 recorded
//! failures or locked; locking is terminal until an administrator unlocks
//! the account.
//!
//! Only login attempts drive the counter. A mismatched old PIN during a
//! PIN update is a different code path and never counts.

use crate::types::{TellerError, User};
use log::{debug, warn};

use super::directory::Directory;

/// Checks credentials and tracks failed attempts per account
pub struct Authenticator {
    /// Failed attempts that trigger a lockout
    max_attempts: u8,
}

impl Authenticator {
    /// Attempts allowed before an account locks
    pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

    /// Create an Authenticator with the standard attempt limit
    pub fn new() -> Self {
        Authenticator {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Attempt a login against an account
    ///
    /// A correct PIN resets the failure counter and returns the owning
    /// user. A wrong PIN increments the counter and, on the attempt that
    /// reaches the limit, locks the account. Attempts against a locked
    /// account are rejected without counting.
    ///
    /// # Arguments
    ///
    /// * `directory` - Account storage to resolve and update
    /// * `account_number` - The account to log into
    /// * `pin` - The PIN as entered
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown number (no state change)
    /// - `AccountLocked` when the account was already locked
    /// - `AccountLockedOut` on the attempt that locks it
    /// - `IncorrectPin` on a wrong PIN with attempts remaining
    pub fn login<'a>(
        &self,
        directory: &'a mut Directory,
        account_number: &str,
        pin: &str,
    ) -> Result<&'a User, TellerError> {
        let (_, account) = directory.resolve_mut(account_number)?;

        if account.locked {
            warn!("login attempt on locked account {account_number}");
            return Err(TellerError::account_locked(account_number));
        }

        if account.pincode != pin {
            account.failed_attempts += 1;
            let attempt = account.failed_attempts;
            if attempt >= self.max_attempts {
                account.locked = true;
                warn!("account {account_number} locked after {attempt} failed attempts");
                return Err(TellerError::locked_out(account_number));
            }
            warn!(
                "wrong PIN for account {account_number} (attempt {attempt}/{})",
                self.max_attempts
            );
            return Err(TellerError::IncorrectPin {
                attempt,
                max: self.max_attempts,
            });
        }

        account.failed_attempts = 0;
        debug!("login succeeded for account {account_number}");

        let (user, _) = directory.find(account_number)?;
        Ok(user)
    }

    /// Administrative unlock
    ///
    /// Clears the locked flag and the failure counter. Harmless on an
    /// account that was not locked.
    pub fn unlock(
        &self,
        directory: &mut Directory,
        account_number: &str,
    ) -> Result<(), TellerError> {
        let (_, account) = directory.resolve_mut(account_number)?;
        account.locked = false;
        account.failed_attempts = 0;
        debug!("account {account_number} unlocked");
        Ok(())
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
