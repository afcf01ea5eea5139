use crate::core::Directory;
use crate::io::seed;
use crate::types::TellerError;
use clap::Parser;
use std::path::PathBuf;

/// Run the interactive coin teller console
#[derive(Parser, Debug)]
#[command(name = "teller-engine")]
#[command(about = "Interactive coin-denominated bank teller", long_about = None)]
pub struct CliArgs {
    /// Seed file with the starting users and accounts
    #[arg(
        long = "seed",
        value_name = "FILE",
        help = "CSV seed file (username,account_number,pin,balance); the built-in demo accounts are used when omitted"
    )]
    pub seed_file: Option<PathBuf>,

    /// Where to write the transaction journal when the console exits
    #[arg(
        long = "export-transactions",
        value_name = "FILE",
        help = "Write the transaction journal to this CSV file on exit"
    )]
    pub export_transactions: Option<PathBuf>,

    /// Where to write the PIN update journal when the console exits
    #[arg(
        long = "export-pin-updates",
        value_name = "FILE",
        help = "Write the PIN update journal to this CSV file on exit"
    )]
    pub export_pin_updates: Option<PathBuf>,
}

impl CliArgs {
    /// Build the starting directory these arguments describe
    ///
    /// Loads the seed file when one was given, otherwise falls back to
    /// the built-in demonstration accounts.
    ///
    /// # Errors
    ///
    /// Returns the seed loader's error when the file is missing or holds
    /// an invalid record.
    pub fn starting_directory(&self) -> Result<Directory, TellerError> {
        match &self.seed_file {
            Some(path) => seed::load_directory(path),
            None => Ok(seed::builtin_directory()),
        }
    }
}
