//! Console module
//!
//! A line-oriented menu surface over [`TellerEngine`]. The console is
//! generic over its input and output streams so sessions can be scripted
//! in tests with in-memory buffers and run over stdin/stdout in the
//! binary.
//!
//! # Session Shape
//!
//! The outer loop offers a user login or the admin menu. A user session
//! authenticates one account number and PIN, shows a balance, then loops
//! over the user menu until Exit. A login rejected for a locked account
//! shuts the console down; other login failures return to the outer loop.
//! All engine validation failures are printed and the menu shown again.

use crate::core::TellerEngine;
use crate::report;
use crate::types::{Receipt, TellerError, TransactionKind, TransferReceipt};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Display format for journal timestamps
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Menu-driven console over a teller engine
///
/// Owns the engine for the lifetime of the console; tests take it back
/// with [`TellerConsole::into_engine`] to inspect the final state.
pub struct TellerConsole<R, W> {
    engine: TellerEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TellerConsole<R, W> {
    /// Create a console over an engine and a pair of streams
    pub fn new(engine: TellerEngine, input: R, output: W) -> Self {
        TellerConsole {
            engine,
            input,
            output,
        }
    }

    /// Consume the console and return the engine
    pub fn into_engine(self) -> TellerEngine {
        self.engine
    }

    /// Run the console until a session ends or input is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error only for stream failures; every domain error is
    /// printed and handled in place.
    pub fn run(&mut self) -> Result<(), TellerError> {
        writeln!(self.output, "Welcome to the Teller Console")?;
        loop {
            let mode = match self.prompt("Login as (1) User or (2) Admin? ")? {
                Some(value) => value,
                None => break,
            };
            match mode.as_str() {
                "1" => {
                    if self.user_session()? {
                        break;
                    }
                }
                "2" => self.admin_session()?,
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
        Ok(())
    }

    /// Write a prompt and read one trimmed line; `None` once input ends
    fn prompt(&mut self, text: &str) -> Result<Option<String>, TellerError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// One authenticated user session
    ///
    /// Returns `true` when the console should shut down afterwards: a
    /// completed session, a locked-account rejection, or exhausted input.
    /// A recoverable login failure returns `false` so the outer loop can
    /// offer the mode prompt again.
    fn user_session(&mut self) -> Result<bool, TellerError> {
        let account_number = match self.prompt("Enter your account number: ")? {
            Some(value) => value,
            None => return Ok(true),
        };
        let pin = match self.prompt("Enter your pincode: ")? {
            Some(value) => value,
            None => return Ok(true),
        };

        let (username, mut numbers) = match self.engine.login(&account_number, &pin) {
            Ok(user) => (
                user.username.clone(),
                user.accounts()
                    .iter()
                    .map(|a| a.account_number.clone())
                    .collect::<Vec<String>>(),
            ),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                let ends = matches!(
                    err,
                    TellerError::AccountLocked { .. } | TellerError::AccountLockedOut { .. }
                );
                return Ok(ends);
            }
        };

        writeln!(self.output, "Welcome, {username}!")?;
        writeln!(self.output, "Your accounts:")?;
        for (i, number) in numbers.iter().enumerate() {
            writeln!(self.output, "{}. Account {}", i + 1, number)?;
        }
        let selected = match self.read_selection(&numbers, "Select account to view balance (number): ")? {
            Some(value) => value,
            None => return Ok(true),
        };
        // Safety: read_selection only returns registered numbers.
        let (_, account) = self.engine.account(&selected).expect("selected account exists");
        let balance = account.balance;
        writeln!(self.output, "Account {selected} balance: ${balance:.2}")?;

        loop {
            self.print_user_menu()?;
            let action = match self.prompt("Select an option (1-9): ")? {
                Some(value) => value,
                None => return Ok(true),
            };
            match action.as_str() {
                "1" => self.deposit_funds(&numbers)?,
                "2" => self.withdraw_funds(&numbers)?,
                "3" => {
                    if let Some(number) = self.create_account(&username)? {
                        numbers.push(number);
                    }
                }
                "4" => self.transfer_own(&numbers)?,
                "5" => self.transfer_to_other(&numbers)?,
                "6" => self.view_history(&numbers)?,
                "7" => self.update_pin(&numbers)?,
                "8" => self.view_pin_history(&numbers)?,
                "9" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(true);
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn print_user_menu(&mut self) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Options:")?;
        writeln!(self.output, "1. Deposit funds")?;
        writeln!(self.output, "2. Withdraw funds")?;
        writeln!(self.output, "3. Create new account")?;
        writeln!(self.output, "4. Transfer between your accounts")?;
        writeln!(self.output, "5. Transfer to another user's account")?;
        writeln!(self.output, "6. View transaction history")?;
        writeln!(self.output, "7. Update personal information (PIN)")?;
        writeln!(self.output, "8. View update history")?;
        writeln!(self.output, "9. Exit")?;
        Ok(())
    }

    /// Print the numbered account list with balances
    fn list_accounts(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        for (i, number) in numbers.iter().enumerate() {
            // Safety: the session list mirrors the directory.
            let (_, account) = self.engine.account(number).expect("listed account exists");
            let balance = account.balance;
            writeln!(
                self.output,
                "{}. Account {} (Balance: ${:.2})",
                i + 1,
                number,
                balance
            )?;
        }
        Ok(())
    }

    /// Read a 1-based selection out of the session's account list
    ///
    /// Anything that does not parse to an in-range index prints
    /// "Invalid selection." and yields `None`, as does exhausted input.
    fn read_selection(
        &mut self,
        numbers: &[String],
        text: &str,
    ) -> Result<Option<String>, TellerError> {
        let line = match self.prompt(text)? {
            Some(value) => value,
            None => return Ok(None),
        };
        match line.parse::<usize>() {
            Ok(choice) if choice >= 1 && choice <= numbers.len() => {
                Ok(Some(numbers[choice - 1].clone()))
            }
            _ => {
                writeln!(self.output, "Invalid selection.")?;
                Ok(None)
            }
        }
    }

    /// Read coin values until `done`; unparsable lines re-prompt
    ///
    /// The collected values go to the engine unvalidated, so rejection
    /// reasons come back on the receipt instead of being decided here.
    fn read_coins(&mut self, text: &str) -> Result<Option<Vec<Decimal>>, TellerError> {
        let mut coins = Vec::new();
        loop {
            let line = match self.prompt(text)? {
                Some(value) => value,
                None => return Ok(None),
            };
            if line.eq_ignore_ascii_case("done") {
                return Ok(Some(coins));
            }
            match Decimal::from_str(&line) {
                Ok(value) => coins.push(value),
                Err(_) => writeln!(self.output, "Please enter a valid number or 'done'.")?,
            }
        }
    }

    /// Read a transfer amount; unparsable input aborts the operation
    fn read_amount(&mut self, text: &str) -> Result<Option<Decimal>, TellerError> {
        let line = match self.prompt(text)? {
            Some(value) => value,
            None => return Ok(None),
        };
        match Decimal::from_str(&line) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Please enter a valid amount.")?;
                Ok(None)
            }
        }
    }

    fn deposit_funds(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Deposit Funds")?;
        self.list_accounts(numbers)?;
        let number = match self.read_selection(numbers, "Select account to deposit into (number): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        writeln!(self.output, "Accepted denominations: 0.05, 0.10, 0.25")?;
        let coins = match self.read_coins("Enter coin to deposit (or 'done' to finish): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.deposit(&number, &coins) {
            Ok(receipt) => self.print_receipt(&receipt)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn withdraw_funds(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Withdraw Funds")?;
        self.list_accounts(numbers)?;
        let number = match self.read_selection(numbers, "Select account to withdraw from (number): ")?
        {
            Some(value) => value,
            None => return Ok(()),
        };
        writeln!(self.output, "Available denominations: 0.05, 0.10, 0.25")?;

        // The same check the engine applies, surfaced before coin entry
        // so a capped account is refused up front.
        let cap = self.engine.limits().daily_withdrawal_cap;
        if self.engine.withdrawn_today(&number) >= cap {
            writeln!(
                self.output,
                "Daily withdrawal limit of ${cap:.2} reached for this account."
            )?;
            return Ok(());
        }

        let coins = match self.read_coins("Enter coin to withdraw (or 'done' to finish): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.withdraw(&number, &coins) {
            Ok(receipt) => self.print_receipt(&receipt)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    /// Open a new account for the logged-in user
    ///
    /// Returns the new account number on success so the session's list
    /// stays current.
    fn create_account(&mut self, username: &str) -> Result<Option<String>, TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Create New Account")?;
        let number = match self.prompt("Enter a new account number: ")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let pin = match self.prompt("Set a 4-digit pincode for the new account: ")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let opening = self.engine.limits().minimum_balance;
        match self.engine.create_account(username, &number, &pin) {
            Ok(account) => {
                let created = account.account_number.clone();
                writeln!(
                    self.output,
                    "Account {created} created successfully with initial deposit of ${opening:.2}."
                )?;
                Ok(Some(created))
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(None)
            }
        }
    }

    fn transfer_own(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Transfer Funds Between Your Accounts")?;
        if numbers.len() < 2 {
            writeln!(self.output, "You need at least two accounts to transfer funds.")?;
            return Ok(());
        }
        self.list_accounts(numbers)?;
        let from = match self.read_selection(numbers, "Select FROM account (number): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let to = match self.read_selection(numbers, "Select TO account (number): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let amount = match self.read_amount("Enter amount to transfer (multiples of 0.05): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.transfer_own(&from, &to, amount) {
            Ok(receipt) => self.print_transfer_receipt(&receipt)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn transfer_to_other(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Transfer Funds to Another User's Account")?;
        self.list_accounts(numbers)?;
        let from = match self.read_selection(numbers, "Select FROM account (number): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let recipient = match self.prompt("Enter the recipient's account number: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let amount = match self.read_amount("Enter amount to transfer (multiples of 0.05): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.transfer_to_other(&from, &recipient, amount) {
            Ok(receipt) => self.print_transfer_receipt(&receipt)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn view_history(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Transaction History ---")?;
        let mut found = false;
        for number in numbers {
            for entry in self.engine.transactions().for_account(number) {
                found = true;
                writeln!(
                    self.output,
                    "{} | {} | {} | {} | ${:.2}",
                    entry.timestamp.format(TIMESTAMP_FORMAT),
                    entry.account_number,
                    entry.username,
                    entry.kind.label(),
                    entry.amount
                )?;
            }
        }
        if !found {
            writeln!(self.output, "No transactions found.")?;
        }
        writeln!(self.output, "---------------------------")?;
        Ok(())
    }

    fn update_pin(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "Update Personal Information (PIN)")?;
        for (i, number) in numbers.iter().enumerate() {
            writeln!(self.output, "{}. Account {}", i + 1, number)?;
        }
        let number = match self.read_selection(numbers, "Select account to update PIN (number): ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let old_pin = match self.prompt("Enter current PIN: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let new_pin = match self.prompt("Enter new 4-digit PIN: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.update_pincode(&number, &old_pin, &new_pin) {
            Ok(()) => writeln!(self.output, "PIN updated successfully.")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn view_pin_history(&mut self, numbers: &[String]) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- PIN Update History ---")?;
        let mut found = false;
        for number in numbers {
            for entry in self.engine.pin_updates().for_account(number) {
                found = true;
                writeln!(
                    self.output,
                    "{} | {} | {} | Old PIN: {} | New PIN: {}",
                    entry.timestamp.format(TIMESTAMP_FORMAT),
                    entry.account_number,
                    entry.username,
                    entry.old_pin,
                    entry.new_pin
                )?;
            }
        }
        if !found {
            writeln!(self.output, "No update history found.")?;
        }
        writeln!(self.output, "--------------------------")?;
        Ok(())
    }

    /// Print a deposit or withdrawal receipt, rejections first
    fn print_receipt(&mut self, receipt: &Receipt) -> Result<(), TellerError> {
        for rejection in &receipt.rejected {
            writeln!(
                self.output,
                "Rejected {:.2}: {}",
                rejection.coin, rejection.reason
            )?;
        }
        let (title, amount_label) = match receipt.kind {
            TransactionKind::Withdrawal => ("Withdrawal Receipt", "Amount Withdrawn"),
            _ => ("Deposit Receipt", "Amount Deposited"),
        };
        writeln!(self.output)?;
        writeln!(self.output, "--- {title} ---")?;
        writeln!(self.output, "Account Number: {}", receipt.account_number)?;
        writeln!(self.output, "User Name: {}", receipt.username)?;
        writeln!(
            self.output,
            "Date/Time: {}",
            receipt.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(self.output, "{}: ${:.2}", amount_label, receipt.amount)?;
        writeln!(self.output, "Current Balance: ${:.2}", receipt.balance)?;
        writeln!(self.output, "----------------------")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn print_transfer_receipt(&mut self, receipt: &TransferReceipt) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Transfer Receipt ---")?;
        writeln!(
            self.output,
            "From Account: {} (User: {})",
            receipt.from_account, receipt.from_username
        )?;
        writeln!(
            self.output,
            "To Account: {} (User: {})",
            receipt.to_account, receipt.to_username
        )?;
        writeln!(
            self.output,
            "Date/Time: {}",
            receipt.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(self.output, "Amount Transferred: ${:.2}", receipt.amount)?;
        writeln!(
            self.output,
            "From Account New Balance: ${:.2}",
            receipt.from_balance
        )?;
        writeln!(
            self.output,
            "To Account New Balance: ${:.2}",
            receipt.to_balance
        )?;
        writeln!(self.output, "------------------------")?;
        writeln!(self.output)?;
        Ok(())
    }

    /// The admin menu loop; returns to the mode prompt on exit
    fn admin_session(&mut self) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- SYSTEM ADMINISTRATOR MENU ---")?;
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Admin Options:")?;
            writeln!(self.output, "1. View all accounts")?;
            writeln!(self.output, "2. Freeze/Unfreeze account")?;
            writeln!(self.output, "3. Add/Remove funds")?;
            writeln!(self.output, "4. View all logs")?;
            writeln!(self.output, "5. Activity report")?;
            writeln!(self.output, "6. Unlock account")?;
            writeln!(self.output, "7. Exit admin menu")?;
            let action = match self.prompt("Select an option (1-7): ")? {
                Some(value) => value,
                None => return Ok(()),
            };
            match action.as_str() {
                "1" => self.admin_view_accounts()?,
                "2" => self.admin_freeze_toggle()?,
                "3" => self.admin_adjust_funds()?,
                "4" => self.admin_view_logs()?,
                "5" => self.admin_activity_report()?,
                "6" => self.admin_unlock()?,
                "7" => return Ok(()),
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn admin_view_accounts(&mut self) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- All Accounts ---")?;
        for (user, account) in self.engine.accounts() {
            let status = if account.frozen { "Frozen" } else { "Active" };
            let locked_mark = if account.locked { " | Locked" } else { "" };
            writeln!(
                self.output,
                "User: {} | Account: {} | Balance: ${:.2} | Status: {}{}",
                user.username, account.account_number, account.balance, status, locked_mark
            )?;
        }
        writeln!(self.output, "--------------------")?;
        Ok(())
    }

    fn admin_freeze_toggle(&mut self) -> Result<(), TellerError> {
        let number = match self.prompt("Enter account number to freeze/unfreeze: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.toggle_frozen(&number) {
            Ok(true) => writeln!(self.output, "Account {number} is now Frozen.")?,
            Ok(false) => writeln!(self.output, "Account {number} is now Unfrozen.")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn admin_adjust_funds(&mut self) -> Result<(), TellerError> {
        let number = match self.prompt("Enter account number to add/remove funds: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        let balance = match self.engine.account(&number) {
            Ok((_, account)) => account.balance,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };
        writeln!(self.output, "Current balance: ${balance:.2}")?;
        let delta = match self.read_amount("Enter amount to add (positive) or remove (negative): ")?
        {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.adjust_balance(&number, delta) {
            Ok(new_balance) => writeln!(self.output, "New balance: ${new_balance:.2}")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn admin_view_logs(&mut self) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- All Transaction Logs ---")?;
        for entry in self.engine.transactions().entries() {
            writeln!(
                self.output,
                "{} | {} | {} | {} | ${:.2}",
                entry.timestamp.format(TIMESTAMP_FORMAT),
                entry.account_number,
                entry.username,
                entry.kind.label(),
                entry.amount
            )?;
        }
        writeln!(self.output, "--- All PIN Update Logs ---")?;
        for entry in self.engine.pin_updates().entries() {
            writeln!(
                self.output,
                "{} | {} | {} | Old PIN: {} | New PIN: {}",
                entry.timestamp.format(TIMESTAMP_FORMAT),
                entry.account_number,
                entry.username,
                entry.old_pin,
                entry.new_pin
            )?;
        }
        writeln!(self.output, "----------------------------")?;
        Ok(())
    }

    fn admin_activity_report(&mut self) -> Result<(), TellerError> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Activity Report ---")?;
        let rows = report::activity_by_account(self.engine.transactions());
        for row in rows {
            writeln!(
                self.output,
                "Account {}: {} transactions",
                row.account_number,
                row.total()
            )?;
        }
        writeln!(self.output, "-----------------------")?;
        Ok(())
    }

    fn admin_unlock(&mut self) -> Result<(), TellerError> {
        let number = match self.prompt("Enter account number to unlock: ")? {
            Some(value) => value,
            None => return Ok(()),
        };
        match self.engine.unlock_account(&number) {
            Ok(()) => writeln!(self.output, "Account {number} is unlocked.")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Directory, ManualClock, TellerEngine};
    use crate::types::{Account, User};
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn seeded_engine() -> TellerEngine {
        let mut directory = Directory::new();
        let mut alice = User::new("alice");
        alice.add_account(Account::new("1001", "1234", Decimal::new(50000, 2)));
        alice.add_account(Account::new("1002", "5678", Decimal::new(150000, 2)));
        directory.register(alice).unwrap();
        let mut bob = User::new("bob");
        bob.add_account(Account::new("2001", "4321", Decimal::new(80000, 2)));
        directory.register(bob).unwrap();

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        TellerEngine::with_clock(directory, Box::new(clock))
    }

    /// Run a scripted session and hand back the engine and transcript
    fn run_session(script: &str) -> (TellerEngine, String) {
        let mut output = Vec::new();
        let mut console = TellerConsole::new(seeded_engine(), Cursor::new(script), &mut output);
        console.run().unwrap();
        let engine = console.into_engine();
        (engine, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_console_exits_on_end_of_input() {
        let (_, transcript) = run_session("");
        assert!(transcript.contains("Welcome to the Teller Console"));
    }

    #[test]
    fn test_console_rejects_unknown_mode() {
        let (_, transcript) = run_session("9\n");
        assert!(transcript.contains("Invalid option."));
    }

    #[test]
    fn test_login_and_balance_view() {
        let (_, transcript) = run_session("1\n1001\n1234\n1\n9\n");

        assert!(transcript.contains("Welcome, alice!"));
        assert!(transcript.contains("1. Account 1001"));
        assert!(transcript.contains("2. Account 1002"));
        assert!(transcript.contains("Account 1001 balance: $500.00"));
        assert!(transcript.contains("Goodbye!"));
    }

    #[test]
    fn test_failed_login_returns_to_mode_prompt() {
        let (engine, transcript) = run_session("1\n1001\n0000\n1\n1001\n1234\n1\n9\n");

        assert!(transcript.contains("Incorrect PIN (attempt 1 of 3)"));
        assert!(transcript.contains("Welcome, alice!"));
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_lockout_shuts_the_console_down() {
        let script = "1\n1001\n0000\n1\n1001\n0000\n1\n1001\n0000\n1\n1001\n1234\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Account 1001 locked after too many failed attempts"));
        // The fourth login never ran; the console stopped at the lockout.
        assert!(!transcript.contains("Welcome, alice!"));
        let (_, account) = engine.account("1001").unwrap();
        assert!(account.locked);
    }

    #[test]
    fn test_deposit_session_updates_balance_and_journal() {
        let script = "1\n1001\n1234\n1\n1\n1\n0.25\n0.10\nnope\n0.05\ndone\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Please enter a valid number or 'done'."));
        assert!(transcript.contains("--- Deposit Receipt ---"));
        assert!(transcript.contains("Amount Deposited: $0.40"));
        assert!(transcript.contains("Current Balance: $500.40"));
        assert!(transcript.contains("Date/Time: 2024-03-01 09:00:00"));

        let (_, account) = engine.account("1001").unwrap();
        assert_eq!(account.balance, Decimal::new(50040, 2));
        assert_eq!(engine.transactions().len(), 1);
    }

    #[test]
    fn test_deposit_echoes_rejected_coins() {
        let script = "1\n1001\n1234\n1\n1\n1\n0.25\n0.03\ndone\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Rejected 0.03: not an accepted coin denomination"));
        assert!(transcript.contains("Amount Deposited: $0.25"));
        let (_, account) = engine.account("1001").unwrap();
        assert_eq!(account.balance, Decimal::new(50025, 2));
    }

    #[test]
    fn test_withdraw_session() {
        let script = "1\n1001\n1234\n1\n2\n1\n0.25\ndone\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("--- Withdrawal Receipt ---"));
        assert!(transcript.contains("Amount Withdrawn: $0.25"));
        assert!(transcript.contains("Current Balance: $499.75"));
        assert_eq!(engine.withdrawn_today("1001"), Decimal::new(25, 2));
    }

    #[test]
    fn test_withdraw_refused_once_cap_reached() {
        // Two sessions back to back: the first withdraws 0.90, the second
        // is turned away before coin entry.
        let script = "1\n1001\n1234\n1\n2\n1\n0.25\n0.25\n0.25\n0.10\n0.05\ndone\n2\n1\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Amount Withdrawn: $0.90"));
        assert!(transcript.contains("Daily withdrawal limit of $0.90 reached for this account."));
        assert_eq!(engine.withdrawn_today("1001"), Decimal::new(90, 2));
    }

    #[test]
    fn test_create_account_extends_the_session() {
        let script = "1\n1001\n1234\n1\n3\n3001\n9999\n1\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript
            .contains("Account 3001 created successfully with initial deposit of $0.05."));
        // The fresh account shows up in the deposit list right away.
        assert!(transcript.contains("3. Account 3001 (Balance: $0.05)"));
        let (user, _) = engine.account("3001").unwrap();
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_transfer_between_own_accounts() {
        let script = "1\n1001\n1234\n1\n4\n1\n2\n0.50\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("--- Transfer Receipt ---"));
        assert!(transcript.contains("From Account: 1001 (User: alice)"));
        assert!(transcript.contains("To Account: 1002 (User: alice)"));
        assert!(transcript.contains("Amount Transferred: $0.50"));
        assert!(transcript.contains("From Account New Balance: $499.50"));
        assert!(transcript.contains("To Account New Balance: $1500.50"));

        let (_, from) = engine.account("1001").unwrap();
        let (_, to) = engine.account("1002").unwrap();
        assert_eq!(from.balance, Decimal::new(49950, 2));
        assert_eq!(to.balance, Decimal::new(150050, 2));
        assert_eq!(engine.transactions().len(), 2);
    }

    #[test]
    fn test_transfer_to_other_user() {
        let script = "1\n1001\n1234\n1\n5\n1\n2001\n0.25\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("To Account: 2001 (User: bob)"));
        let (_, recipient) = engine.account("2001").unwrap();
        assert_eq!(recipient.balance, Decimal::new(80025, 2));
    }

    #[test]
    fn test_transfer_validation_errors_are_printed() {
        let script = "1\n1001\n1234\n1\n4\n1\n1\n0.50\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Cannot transfer from account 1001 to itself"));
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_history_views() {
        let script = "1\n1001\n1234\n1\n1\n1\n0.25\ndone\n6\n8\n9\n";
        let (_, transcript) = run_session(script);

        assert!(transcript.contains("--- Transaction History ---"));
        assert!(transcript.contains("2024-03-01 09:00:00 | 1001 | alice | deposit | $0.25"));
        assert!(transcript.contains("--- PIN Update History ---"));
        assert!(transcript.contains("No update history found."));
    }

    #[test]
    fn test_pin_update_flow() {
        let script = "1\n1001\n1234\n1\n7\n1\n1234\n8888\n8\n9\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("PIN updated successfully."));
        assert!(transcript.contains("Old PIN: 1234 | New PIN: 8888"));
        let (_, account) = engine.account("1001").unwrap();
        assert_eq!(account.pincode, "8888");
    }

    #[test]
    fn test_admin_views_accounts_in_order() {
        let (_, transcript) = run_session("2\n1\n7\n");

        assert!(transcript.contains("--- SYSTEM ADMINISTRATOR MENU ---"));
        let alice_first = transcript
            .find("User: alice | Account: 1001 | Balance: $500.00 | Status: Active")
            .unwrap();
        let bob_after = transcript
            .find("User: bob | Account: 2001 | Balance: $800.00 | Status: Active")
            .unwrap();
        assert!(alice_first < bob_after);
    }

    #[test]
    fn test_admin_freeze_and_adjust() {
        let script = "2\n2\n1001\n3\n1001\n-100.00\n1\n7\n";
        let (engine, transcript) = run_session(script);

        assert!(transcript.contains("Account 1001 is now Frozen."));
        assert!(transcript.contains("Current balance: $500.00"));
        assert!(transcript.contains("New balance: $400.00"));
        assert!(transcript.contains("Status: Frozen"));

        let (_, account) = engine.account("1001").unwrap();
        assert!(account.frozen);
        assert_eq!(account.balance, Decimal::new(40000, 2));
        // Admin adjustments stay out of the journal.
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_admin_unlock_restores_login() {
        let script = "1\n2001\n0\n1\n2001\n0\n1\n2001\n0\n";
        let (mut engine, transcript) = run_session(script);
        assert!(transcript.contains("Account 2001 locked after too many failed attempts"));

        // A second console run over the same engine unlocks and logs in.
        let mut output = Vec::new();
        let mut console =
            TellerConsole::new(engine, Cursor::new("2\n6\n2001\n7\n1\n2001\n4321\n1\n9\n"), &mut output);
        console.run().unwrap();
        engine = console.into_engine();
        let transcript = String::from_utf8(output).unwrap();

        assert!(transcript.contains("Account 2001 is unlocked."));
        assert!(transcript.contains("Welcome, bob!"));
        let (_, account) = engine.account("2001").unwrap();
        assert!(!account.locked);
    }

    #[test]
    fn test_admin_activity_report_counts() {
        let script = "1\n1001\n1234\n1\n1\n1\n0.25\ndone\n4\n1\n2\n0.05\n9\n";
        let (engine, transcript) = run_session(script);
        assert_eq!(engine.transactions().len(), 3);

        let mut output = Vec::new();
        let mut console = TellerConsole::new(engine, Cursor::new("2\n5\n7\n"), &mut output);
        console.run().unwrap();
        let transcript_admin = String::from_utf8(output).unwrap();

        assert!(transcript.contains("--- Transfer Receipt ---"));
        assert!(transcript_admin.contains("Account 1001: 2 transactions"));
        assert!(transcript_admin.contains("Account 1002: 1 transactions"));
    }

    #[test]
    fn test_admin_view_logs_shows_both_journals() {
        let script = "1\n1001\n1234\n1\n1\n1\n0.10\ndone\n7\n1\n1234\n7777\n9\n";
        let (engine, _) = run_session(script);

        let mut output = Vec::new();
        let mut console = TellerConsole::new(engine, Cursor::new("2\n4\n7\n"), &mut output);
        console.run().unwrap();
        let transcript = String::from_utf8(output).unwrap();

        assert!(transcript.contains("--- All Transaction Logs ---"));
        assert!(transcript.contains("1001 | alice | deposit | $0.10"));
        assert!(transcript.contains("--- All PIN Update Logs ---"));
        assert!(transcript.contains("Old PIN: 1234 | New PIN: 7777"));
    }
}
