//! Journal export
//!
//! Writes the transaction and PIN update journals as CSV so an admin
//! session can hand the day's activity to something else. Timestamps are
//! RFC 3339 and amounts carry two decimal places.

use crate::core::{PinUpdateLog, TransactionLog};
use crate::types::TellerError;
use csv::Writer;
use std::io::Write;

/// Write the transaction journal as CSV
///
/// Columns: account_number, username, timestamp, kind, amount. Entries
/// come out in journal order, which is chronological.
///
/// # Arguments
///
/// * `log` - The transaction journal to export
/// * `output` - Destination for the CSV data
///
/// # Errors
///
/// Returns an error when writing or flushing fails.
pub fn write_transactions_csv<W: Write>(
    log: &TransactionLog,
    output: W,
) -> Result<(), TellerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["account_number", "username", "timestamp", "kind", "amount"])?;
    for entry in log.entries() {
        writer.write_record(&[
            entry.account_number.clone(),
            entry.username.clone(),
            entry.timestamp.to_rfc3339(),
            entry.kind.label().to_string(),
            format!("{:.2}", entry.amount),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the PIN update journal as CSV
///
/// Columns: account_number, username, timestamp, old_pin, new_pin.
///
/// # Arguments
///
/// * `log` - The PIN update journal to export
/// * `output` - Destination for the CSV data
///
/// # Errors
///
/// Returns an error when writing or flushing fails.
pub fn write_pin_updates_csv<W: Write>(
    log: &PinUpdateLog,
    output: W,
) -> Result<(), TellerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record([
        "account_number",
        "username",
        "timestamp",
        "old_pin",
        "new_pin",
    ])?;
    for entry in log.entries() {
        writer.write_record(&[
            entry.account_number.clone(),
            entry.username.clone(),
            entry.timestamp.to_rfc3339(),
            entry.old_pin.clone(),
            entry.new_pin.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PinUpdateEntry, TransactionEntry, TransactionKind};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn entry(kind: TransactionKind, cents: i64) -> TransactionEntry {
        TransactionEntry {
            account_number: "1001".to_string(),
            username: "alice".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            kind,
            amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_write_transactions_csv_formats_entries() {
        let mut log = TransactionLog::new();
        log.append(entry(TransactionKind::Deposit, 25));
        log.append(entry(TransactionKind::Withdrawal, 10));

        let mut output = Vec::new();
        write_transactions_csv(&log, &mut output).unwrap();

        let csv_output = String::from_utf8(output).unwrap();
        let expected = "account_number,username,timestamp,kind,amount\n\
            1001,alice,2024-03-01T09:00:00+00:00,deposit,0.25\n\
            1001,alice,2024-03-01T09:00:00+00:00,withdrawal,0.10\n";
        assert_eq!(csv_output, expected);
    }

    #[test]
    fn test_write_transactions_csv_empty_log_writes_header_only() {
        let log = TransactionLog::new();

        let mut output = Vec::new();
        write_transactions_csv(&log, &mut output).unwrap();

        let csv_output = String::from_utf8(output).unwrap();
        assert_eq!(csv_output, "account_number,username,timestamp,kind,amount\n");
    }

    #[test]
    fn test_write_transactions_csv_labels_transfer_legs() {
        let mut log = TransactionLog::new();
        log.append(entry(TransactionKind::TransferOut, 15));
        log.append(entry(TransactionKind::TransferIn, 15));

        let mut output = Vec::new();
        write_transactions_csv(&log, &mut output).unwrap();

        let csv_output = String::from_utf8(output).unwrap();
        assert!(csv_output.contains("transfer_out,0.15"));
        assert!(csv_output.contains("transfer_in,0.15"));
    }

    #[test]
    fn test_write_pin_updates_csv_formats_entries() {
        let mut log = PinUpdateLog::new();
        log.append(PinUpdateEntry {
            account_number: "2001".to_string(),
            username: "bob".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 14, 30, 0).unwrap(),
            old_pin: "4321".to_string(),
            new_pin: "9876".to_string(),
        });

        let mut output = Vec::new();
        write_pin_updates_csv(&log, &mut output).unwrap();

        let csv_output = String::from_utf8(output).unwrap();
        let expected = "account_number,username,timestamp,old_pin,new_pin\n\
            2001,bob,2024-03-02T14:30:00+00:00,4321,9876\n";
        assert_eq!(csv_output, expected);
    }
}
