//! Reporting module
//!
//! Read-only aggregations over the transaction journal. Nothing in here
//! mutates engine state; every function takes `&TransactionLog` and
//! produces an owned summary suitable for tables or charting.

use crate::core::TransactionLog;
use crate::types::TransactionKind;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Per-account transaction counts for the admin activity report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountActivity {
    pub account_number: String,
    pub username: String,
    pub deposits: usize,
    pub withdrawals: usize,
    pub transfers_out: usize,
    pub transfers_in: usize,
}

impl AccountActivity {
    fn new(account_number: &str, username: &str) -> Self {
        Self {
            account_number: account_number.to_string(),
            username: username.to_string(),
            deposits: 0,
            withdrawals: 0,
            transfers_out: 0,
            transfers_in: 0,
        }
    }

    /// Total number of journal entries for this account
    pub fn total(&self) -> usize {
        self.deposits + self.withdrawals + self.transfers_out + self.transfers_in
    }
}

/// Transaction counts for one calendar day, transfers folded together
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DailyVolume {
    pub deposits: usize,
    pub withdrawals: usize,
    pub transfers: usize,
}

/// Count journal entries per account, grouped by kind
///
/// # Arguments
///
/// * `log` - The transaction journal to summarize
///
/// # Returns
///
/// One row per account that appears in the journal, sorted by account
/// number for deterministic output. Accounts with no activity do not
/// appear.
pub fn activity_by_account(log: &TransactionLog) -> Vec<AccountActivity> {
    let mut by_account: HashMap<String, AccountActivity> = HashMap::new();

    for entry in log.entries() {
        let activity = by_account
            .entry(entry.account_number.clone())
            .or_insert_with(|| AccountActivity::new(&entry.account_number, &entry.username));
        match entry.kind {
            TransactionKind::Deposit => activity.deposits += 1,
            TransactionKind::Withdrawal => activity.withdrawals += 1,
            TransactionKind::TransferOut => activity.transfers_out += 1,
            TransactionKind::TransferIn => activity.transfers_in += 1,
        }
    }

    let mut rows: Vec<AccountActivity> = by_account.into_values().collect();
    rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
    rows
}

/// Count journal entries per calendar day
///
/// Both transfer legs count under `transfers`, so a single transfer
/// contributes two.
///
/// # Arguments
///
/// * `log` - The transaction journal to summarize
///
/// # Returns
///
/// A date-ordered map; days with no activity do not appear.
pub fn daily_volume(log: &TransactionLog) -> BTreeMap<NaiveDate, DailyVolume> {
    let mut by_day: BTreeMap<NaiveDate, DailyVolume> = BTreeMap::new();

    for entry in log.entries() {
        let volume = by_day.entry(entry.timestamp.date_naive()).or_default();
        match entry.kind {
            TransactionKind::Deposit => volume.deposits += 1,
            TransactionKind::Withdrawal => volume.withdrawals += 1,
            TransactionKind::TransferOut | TransactionKind::TransferIn => volume.transfers += 1,
        }
    }

    by_day
}

/// Build the cumulative signed movement series for one account
///
/// Credits (deposits, incoming transfers) add to the running total and
/// debits subtract, starting from zero. The series is in journal order,
/// one point per entry, ready for a charting collaborator.
///
/// # Arguments
///
/// * `log` - The transaction journal to read
/// * `account_number` - The account to chart
///
/// # Returns
///
/// Timestamped running totals; empty when the account has no activity.
pub fn cumulative_net(
    log: &TransactionLog,
    account_number: &str,
) -> Vec<(DateTime<Utc>, Decimal)> {
    let mut running = Decimal::ZERO;
    let mut series = Vec::new();

    for entry in log.for_account(account_number) {
        if entry.kind.is_credit() {
            running += entry.amount;
        } else {
            running -= entry.amount;
        }
        series.push((entry.timestamp, running));
    }

    series
}
