//! Journal storage
//!
//! This module provides the append-only stores backing the audit surface:
//! the transaction log, the PIN update log, and the per-day withdrawal
//! totals consulted by the daily cap.
//!
//! Entries are only ever appended. Nothing in a session mutates or removes
//! a recorded entry, so slices handed out by these stores are stable
//! within-session history.

use crate::types::{PinUpdateEntry, TransactionEntry};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Append-only record of completed balance changes
///
/// Transfers contribute two entries (one per side); deposits and
/// withdrawals contribute one. Order is append order.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: Vec<TransactionEntry>,
}

impl TransactionLog {
    /// Create an empty log
    pub fn new() -> Self {
        TransactionLog {
            entries: Vec::new(),
        }
    }

    /// Append one entry
    pub fn append(&mut self, entry: TransactionEntry) {
        self.entries.push(entry);
    }

    /// All entries in append order
    pub fn entries(&self) -> &[TransactionEntry] {
        &self.entries
    }

    /// Entries touching one account, in append order
    pub fn for_account<'a>(
        &'a self,
        account_number: &'a str,
    ) -> impl Iterator<Item = &'a TransactionEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.account_number == account_number)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append-only record of completed PIN changes
#[derive(Debug, Default)]
pub struct PinUpdateLog {
    entries: Vec<PinUpdateEntry>,
}

impl PinUpdateLog {
    /// Create an empty log
    pub fn new() -> Self {
        PinUpdateLog {
            entries: Vec::new(),
        }
    }

    /// Append one entry
    pub fn append(&mut self, entry: PinUpdateEntry) {
        self.entries.push(entry);
    }

    /// All entries in append order
    pub fn entries(&self) -> &[PinUpdateEntry] {
        &self.entries
    }

    /// Entries for one account, in append order
    pub fn for_account<'a>(
        &'a self,
        account_number: &'a str,
    ) -> impl Iterator<Item = &'a PinUpdateEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.account_number == account_number)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cumulative withdrawal totals per account and calendar day
///
/// A date rollover needs no reset step: the next day simply reads an
/// absent key as zero.
#[derive(Debug, Default)]
pub struct DailyWithdrawals {
    totals: HashMap<(String, NaiveDate), Decimal>,
}

impl DailyWithdrawals {
    /// Create an empty counter
    pub fn new() -> Self {
        DailyWithdrawals {
            totals: HashMap::new(),
        }
    }

    /// Amount withdrawn from an account on a given day (zero when none)
    pub fn withdrawn_on(&self, account_number: &str, date: NaiveDate) -> Decimal {
        self.totals
            .get(&(account_number.to_string(), date))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Add a completed withdrawal to the day's total
    pub fn record(&mut self, account_number: &str, date: NaiveDate, amount: Decimal) {
        let total = self
            .totals
            .entry((account_number.to_string(), date))
            .or_insert(Decimal::ZERO);
        *total += amount;
    }
}
