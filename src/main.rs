//! Teller Engine CLI
//!
//! Interactive console for a coin-denominated bank teller.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --seed bank.csv
//! cargo run -- --export-transactions tx.csv --export-pin-updates pins.csv
//! ```
//!
//! The program seeds an in-memory bank (from the --seed CSV file, or the
//! built-in demonstration accounts), then runs the menu console over
//! stdin/stdout until a session ends. Journals can be written out as CSV
//! when the console exits.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad seed file, unwritable export path, stream failure)

use std::fs::File;
use std::io::{stdin, stdout};
use std::process;
use teller_engine::cli;
use teller_engine::console::TellerConsole;
use teller_engine::core::TellerEngine;
use teller_engine::io::{write_pin_updates_csv, write_transactions_csv};
use teller_engine::types::TellerError;

fn main() {
    env_logger::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), TellerError> {
    let directory = args.starting_directory()?;
    let engine = TellerEngine::new(directory);

    let stdin = stdin();
    let stdout = stdout();
    let mut console = TellerConsole::new(engine, stdin.lock(), stdout.lock());
    console.run()?;
    let engine = console.into_engine();

    if let Some(path) = &args.export_transactions {
        write_transactions_csv(engine.transactions(), File::create(path)?)?;
    }
    if let Some(path) = &args.export_pin_updates {
        write_pin_updates_csv(engine.pin_updates(), File::create(path)?)?;
    }

    Ok(())
}
