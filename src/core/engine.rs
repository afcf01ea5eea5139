//! Teller operation engine
//!
//! This module provides the TellerEngine that orchestrates every counter
//! operation by coordinating the Directory, the Authenticator, the journal
//! stores, and the clock.
//!
//! The engine enforces business rules such as:
//! - Coin-by-coin acceptance for deposits and withdrawals
//! - The daily withdrawal cap and the minimum residual balance
//! - Validate-first transfers that debit and credit atomically
//! - Append-only journaling of every completed balance change
//!
//! Authentication gates sit at the session layer; the operations here trust
//! that the caller has already logged the customer in.

use crate::core::auth::Authenticator;
use crate::core::clock::{Clock, SystemClock};
use crate::core::directory::Directory;
use crate::core::journal::{DailyWithdrawals, PinUpdateLog, TransactionLog};
use crate::types::{
    is_coin_multiple, is_valid_pincode, Account, CoinRejectReason, CoinRejection, Denomination,
    Limits, PinUpdateEntry, Receipt, TellerError, TransactionEntry, TransactionKind,
    TransferReceipt, User,
};
use log::{debug, warn};
use rust_decimal::Decimal;

/// Teller operation engine
///
/// Owns all mutable session state: the user directory, both journals, the
/// per-day withdrawal totals, the operational limits, and the clock. All
/// operations are synchronous and return either a receipt describing what
/// happened or a typed error describing why nothing happened.
pub struct TellerEngine {
    directory: Directory,
    authenticator: Authenticator,
    transactions: TransactionLog,
    pin_updates: PinUpdateLog,
    daily: DailyWithdrawals,
    limits: Limits,
    clock: Box<dyn Clock>,
}

impl TellerEngine {
    /// Create an engine over a seeded directory
    ///
    /// Uses the wall clock and the standard limits.
    ///
    /// # Arguments
    ///
    /// * `directory` - The user directory to serve, typically from a seed
    pub fn new(directory: Directory) -> Self {
        Self::with_parts(directory, Limits::default(), Box::new(SystemClock))
    }

    /// Create an engine with an injected clock and the standard limits
    ///
    /// This is the constructor tests reach for together with
    /// [`crate::core::clock::ManualClock`].
    pub fn with_clock(directory: Directory, clock: Box<dyn Clock>) -> Self {
        Self::with_parts(directory, Limits::default(), clock)
    }

    /// Create an engine with every collaborator chosen by the caller
    pub fn with_parts(directory: Directory, limits: Limits, clock: Box<dyn Clock>) -> Self {
        TellerEngine {
            directory,
            authenticator: Authenticator::new(),
            transactions: TransactionLog::new(),
            pin_updates: PinUpdateLog::new(),
            daily: DailyWithdrawals::new(),
            limits,
            clock,
        }
    }

    /// Attempt a login
    ///
    /// Delegates to the [`Authenticator`]; see there for the lockout rules.
    pub fn login(&mut self, account_number: &str, pin: &str) -> Result<&User, TellerError> {
        self.authenticator
            .login(&mut self.directory, account_number, pin)
    }

    /// Deposit a batch of coins into an account
    ///
    /// Each tendered value is screened on its own: negative values and
    /// values that match no denomination are rejected individually and the
    /// rest are accepted. The accepted total is credited in one step and
    /// appended to the transaction log as a single deposit.
    ///
    /// # Arguments
    ///
    /// * `account_number` - The target account
    /// * `coins` - Tendered values, in the order offered
    ///
    /// # Returns
    ///
    /// A receipt with the accepted total, the closing balance, and every
    /// rejected coin with its reason.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - Every tendered value was rejected (`NoCoinsDeposited`)
    /// - The balance cannot absorb the sum exactly (`ArithmeticOverflow`)
    pub fn deposit(
        &mut self,
        account_number: &str,
        coins: &[Decimal],
    ) -> Result<Receipt, TellerError> {
        let now = self.clock.now();
        let (username, account) = self.directory.resolve_mut(account_number)?;

        let mut accepted = Decimal::ZERO;
        let mut rejected = Vec::new();
        for &coin in coins {
            let reason = if coin < Decimal::ZERO {
                Some(CoinRejectReason::Negative)
            } else if Denomination::from_value(coin).is_none() {
                Some(CoinRejectReason::UnknownDenomination)
            } else {
                None
            };
            match reason {
                Some(reason) => {
                    warn!("rejected coin {coin} for account {account_number}: {reason}");
                    rejected.push(CoinRejection { coin, reason });
                }
                None => accepted += coin,
            }
        }

        if accepted == Decimal::ZERO {
            return Err(TellerError::no_coins_deposited(account_number));
        }

        if !account.deposit(accepted) {
            return Err(TellerError::arithmetic_overflow("deposit", account_number));
        }
        let balance = account.balance;
        debug!("deposited {accepted} into account {account_number}");

        self.transactions.append(TransactionEntry {
            account_number: account_number.to_string(),
            username: username.clone(),
            timestamp: now,
            kind: TransactionKind::Deposit,
            amount: accepted,
        });

        Ok(Receipt {
            account_number: account_number.to_string(),
            username,
            timestamp: now,
            kind: TransactionKind::Deposit,
            amount: accepted,
            balance,
            rejected,
        })
    }

    /// Withdraw a batch of coins from an account
    ///
    /// The operation fails outright when the day's allowance is already
    /// used up. Otherwise each requested coin is screened in order: it must
    /// be a denomination, fit under the daily cap together with everything
    /// accepted so far today, leave at least the minimum balance behind,
    /// and fit inside the balance. Coins that fail a check are rejected
    /// individually and the rest are paid out.
    ///
    /// The accepted total is debited in one step, added to the day's
    /// counter, and appended to the transaction log as a single withdrawal.
    ///
    /// # Arguments
    ///
    /// * `account_number` - The source account
    /// * `coins` - Requested coin values, in the order requested
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The daily cap was already reached before this operation
    /// - Every requested coin was rejected (`NoFundsWithdrawn`)
    /// - The debit cannot be represented exactly (`ArithmeticOverflow`)
    pub fn withdraw(
        &mut self,
        account_number: &str,
        coins: &[Decimal],
    ) -> Result<Receipt, TellerError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let (username, account) = self.directory.resolve_mut(account_number)?;

        let withdrawn_today = self.daily.withdrawn_on(account_number, today);
        if withdrawn_today >= self.limits.daily_withdrawal_cap {
            warn!("daily cap already reached for account {account_number}");
            return Err(TellerError::daily_cap_reached(
                account_number,
                self.limits.daily_withdrawal_cap,
            ));
        }

        let mut accepted = Decimal::ZERO;
        let mut rejected = Vec::new();
        for &coin in coins {
            let reason = if coin < Decimal::ZERO {
                Some(CoinRejectReason::Negative)
            } else if Denomination::from_value(coin).is_none() {
                Some(CoinRejectReason::UnknownDenomination)
            } else if accepted + coin + withdrawn_today > self.limits.daily_withdrawal_cap {
                Some(CoinRejectReason::DailyCapExceeded)
            } else if account.balance - accepted - coin < self.limits.minimum_balance {
                Some(CoinRejectReason::WouldBreachMinimum)
            } else if accepted + coin > account.balance {
                Some(CoinRejectReason::ExceedsBalance)
            } else {
                None
            };
            match reason {
                Some(reason) => {
                    warn!("rejected coin {coin} for account {account_number}: {reason}");
                    rejected.push(CoinRejection { coin, reason });
                }
                None => accepted += coin,
            }
        }

        if accepted == Decimal::ZERO {
            return Err(TellerError::no_funds_withdrawn(account_number));
        }

        if !account.withdraw(accepted) {
            return Err(TellerError::arithmetic_overflow("withdrawal", account_number));
        }
        let balance = account.balance;
        debug!("withdrew {accepted} from account {account_number}");

        self.daily.record(account_number, today, accepted);
        self.transactions.append(TransactionEntry {
            account_number: account_number.to_string(),
            username: username.clone(),
            timestamp: now,
            kind: TransactionKind::Withdrawal,
            amount: accepted,
        });

        Ok(Receipt {
            account_number: account_number.to_string(),
            username,
            timestamp: now,
            kind: TransactionKind::Withdrawal,
            amount: accepted,
            balance,
            rejected,
        })
    }

    /// Transfer between two accounts of the same user
    ///
    /// # Errors
    ///
    /// Returns `CrossOwnerTransfer` when the destination belongs to a
    /// different user, plus everything [`TellerEngine::transfer_to_other`]
    /// can return.
    pub fn transfer_own(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, TellerError> {
        self.transfer(from, to, amount, true)
    }

    /// Transfer to an account of any user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source and destination are the same account
    /// - Either account does not exist
    /// - The amount is not positive or not payable in coins
    /// - The source would drop below the minimum balance
    /// - Either balance cannot take the movement exactly
    ///   (`ArithmeticOverflow`, checked before any mutation)
    pub fn transfer_to_other(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, TellerError> {
        self.transfer(from, to, amount, false)
    }

    /// Shared transfer path
    ///
    /// Validates everything against immutable state first, then performs
    /// the debit and the credit. With a single session there is nothing to
    /// interleave between the two mutations, so the pair is atomic in
    /// effect.
    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        require_same_owner: bool,
    ) -> Result<TransferReceipt, TellerError> {
        if from == to {
            return Err(TellerError::same_account_transfer(from));
        }

        let (from_owner, from_balance) = {
            let (user, account) = self.directory.find(from)?;
            (user.username.clone(), account.balance)
        };
        let (to_owner, to_headroom) = {
            let (user, account) = self.directory.find(to)?;
            (user.username.clone(), account.balance)
        };

        if require_same_owner && from_owner != to_owner {
            return Err(TellerError::cross_owner_transfer(from, to));
        }
        if amount <= Decimal::ZERO {
            return Err(TellerError::NonPositiveAmount { amount });
        }
        if !is_coin_multiple(amount) {
            return Err(TellerError::AmountNotCoinMultiple { amount });
        }
        if from_balance - amount < self.limits.minimum_balance {
            return Err(TellerError::minimum_balance_breached(
                from,
                self.limits.minimum_balance,
            ));
        }
        // Near Decimal's ceiling scale alignment can swallow the credit
        // without overflowing checked_add. Catch it here, before either
        // side is mutated.
        let credited = to_headroom
            .checked_add(amount)
            .ok_or_else(|| TellerError::arithmetic_overflow("transfer", to))?;
        if credited - to_headroom != amount {
            return Err(TellerError::arithmetic_overflow("transfer", to));
        }

        let now = self.clock.now();

        let from_balance = {
            let (_, account) = self.directory.resolve_mut(from)?;
            if !account.withdraw(amount) {
                return Err(TellerError::arithmetic_overflow("transfer", from));
            }
            account.balance
        };
        let to_balance = {
            let (_, account) = self.directory.resolve_mut(to)?;
            if !account.deposit(amount) {
                return Err(TellerError::arithmetic_overflow("transfer", to));
            }
            account.balance
        };
        debug!("transferred {amount} from account {from} to account {to}");

        self.transactions.append(TransactionEntry {
            account_number: from.to_string(),
            username: from_owner.clone(),
            timestamp: now,
            kind: TransactionKind::TransferOut,
            amount,
        });
        self.transactions.append(TransactionEntry {
            account_number: to.to_string(),
            username: to_owner.clone(),
            timestamp: now,
            kind: TransactionKind::TransferIn,
            amount,
        });

        Ok(TransferReceipt {
            from_account: from.to_string(),
            from_username: from_owner,
            from_balance,
            to_account: to.to_string(),
            to_username: to_owner,
            to_balance,
            timestamp: now,
            amount,
        })
    }

    /// Open an additional account for an existing user
    ///
    /// The new account starts at the minimum balance, which the bank
    /// fronts as the opening float.
    ///
    /// # Arguments
    ///
    /// * `username` - The owning user
    /// * `account_number` - The requested number, unique bank-wide
    /// * `pin` - The initial PIN, four ASCII digits
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The number is already registered anywhere (`AccountExists`)
    /// - The PIN is malformed
    /// - The user does not exist
    pub fn create_account(
        &mut self,
        username: &str,
        account_number: &str,
        pin: &str,
    ) -> Result<&Account, TellerError> {
        if self.directory.contains_account(account_number) {
            return Err(TellerError::account_exists(account_number));
        }
        if !is_valid_pincode(pin) {
            return Err(TellerError::MalformedPin);
        }

        let account = Account::new(account_number, pin, self.limits.minimum_balance);
        self.directory.add_account(username, account)?;
        debug!("opened account {account_number} for user {username}");

        let (_, account) = self.directory.find(account_number)?;
        Ok(account)
    }

    /// Change an account's PIN
    ///
    /// The old PIN must match exactly; a mismatch is reported but never
    /// counts towards the login lockout. Successful changes are appended
    /// to the PIN update log with the old and new values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The old PIN does not match (`PinMismatch`)
    /// - The new PIN is malformed or equal to the current one
    pub fn update_pincode(
        &mut self,
        account_number: &str,
        old_pin: &str,
        new_pin: &str,
    ) -> Result<(), TellerError> {
        let now = self.clock.now();
        let (username, account) = self.directory.resolve_mut(account_number)?;

        if account.pincode != old_pin {
            warn!("PIN update with wrong current PIN for account {account_number}");
            return Err(TellerError::pin_mismatch(account_number));
        }
        if !is_valid_pincode(new_pin) {
            return Err(TellerError::MalformedPin);
        }
        if new_pin == account.pincode {
            return Err(TellerError::PinUnchanged);
        }

        let old_pin = account.pincode.clone();
        account.set_pincode(new_pin);
        debug!("updated PIN for account {account_number}");

        self.pin_updates.append(PinUpdateEntry {
            account_number: account_number.to_string(),
            username,
            timestamp: now,
            old_pin,
            new_pin: new_pin.to_string(),
        });

        Ok(())
    }

    /// Flip the administrative freeze marker
    ///
    /// # Returns
    ///
    /// The new state of the marker.
    pub fn toggle_frozen(&mut self, account_number: &str) -> Result<bool, TellerError> {
        let (_, account) = self.directory.resolve_mut(account_number)?;
        account.frozen = !account.frozen;
        debug!(
            "account {account_number} is now {}",
            if account.frozen { "frozen" } else { "unfrozen" }
        );
        Ok(account.frozen)
    }

    /// Administrative balance adjustment
    ///
    /// Positive deltas add funds, negative deltas remove them. Removals
    /// may go below the minimum balance but never below zero. Adjustments
    /// are corrections, not customer activity, and are not journaled.
    ///
    /// # Returns
    ///
    /// The balance after the adjustment.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` when a removal exceeds the balance and
    /// `ArithmeticOverflow` when the balance cannot absorb the delta
    /// exactly.
    pub fn adjust_balance(
        &mut self,
        account_number: &str,
        delta: Decimal,
    ) -> Result<Decimal, TellerError> {
        let (_, account) = self.directory.resolve_mut(account_number)?;

        if delta > Decimal::ZERO {
            if !account.deposit(delta) {
                return Err(TellerError::arithmetic_overflow("adjustment", account_number));
            }
        } else if delta < Decimal::ZERO {
            let removal = -delta;
            if removal > account.balance {
                return Err(TellerError::insufficient_funds(
                    account_number,
                    account.balance,
                    removal,
                ));
            }
            if !account.withdraw(removal) {
                return Err(TellerError::arithmetic_overflow("adjustment", account_number));
            }
        }
        debug!("adjusted account {account_number} by {delta}");

        Ok(account.balance)
    }

    /// Administrative unlock of a locked account
    pub fn unlock_account(&mut self, account_number: &str) -> Result<(), TellerError> {
        self.authenticator.unlock(&mut self.directory, account_number)
    }

    /// Look up one account and its owner
    pub fn account(&self, account_number: &str) -> Result<(&User, &Account), TellerError> {
        self.directory.find(account_number)
    }

    /// Every account with its owner, in display order
    pub fn accounts(&self) -> impl Iterator<Item = (&User, &Account)> {
        self.directory.all()
    }

    /// The transaction journal
    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }

    /// The PIN update journal
    pub fn pin_updates(&self) -> &PinUpdateLog {
        &self.pin_updates
    }

    /// Amount already withdrawn from an account today
    pub fn withdrawn_today(&self, account_number: &str) -> Decimal {
        self.daily
            .withdrawn_on(account_number, self.clock.now().date_naive())
    }

    /// The limits this engine enforces
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}
