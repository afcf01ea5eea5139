//! Benchmark suite for the teller engine's core operations
//!
//! Measures the cost of single operations against a freshly seeded
//! in-memory engine using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use rust_decimal::Decimal;
use teller_engine::core::{Directory, TellerEngine};
use teller_engine::io::builtin_directory;
use teller_engine::types::{Account, User};

fn main() {
    divan::main();
}

fn seeded_engine() -> TellerEngine {
    TellerEngine::new(builtin_directory())
}

/// Benchmark a successful login against the built-in seed
#[divan::bench]
fn login() {
    let mut engine = seeded_engine();
    engine.login("1001", "1234").expect("Login failed");
}

/// Benchmark a three-coin deposit
#[divan::bench]
fn deposit_three_coins() {
    let mut engine = seeded_engine();
    let coins = [Decimal::new(25, 2), Decimal::new(10, 2), Decimal::new(5, 2)];
    engine.deposit("1001", &coins).expect("Deposit failed");
}

/// Benchmark a single-coin withdrawal
#[divan::bench]
fn withdraw_one_coin() {
    let mut engine = seeded_engine();
    engine
        .withdraw("1001", &[Decimal::new(25, 2)])
        .expect("Withdrawal failed");
}

/// Benchmark a transfer between one user's accounts
#[divan::bench]
fn transfer_own_accounts() {
    let mut engine = seeded_engine();
    engine
        .transfer_own("1001", "1002", Decimal::new(50, 2))
        .expect("Transfer failed");
}

/// Benchmark registering 100 users with two accounts each
#[divan::bench]
fn register_two_hundred_accounts() {
    let mut directory = Directory::new();
    for i in 0..100 {
        let mut user = User::new(&format!("user{i:03}"));
        user.add_account(Account::new(
            &format!("{}", 10_000 + 2 * i),
            "1234",
            Decimal::new(10_000, 2),
        ));
        user.add_account(Account::new(
            &format!("{}", 10_001 + 2 * i),
            "1234",
            Decimal::new(10_000, 2),
        ));
        directory.register(user).expect("Registration failed");
    }
}

/// Benchmark one hundred journaled deposits back to back
#[divan::bench]
fn hundred_deposits() {
    let mut engine = seeded_engine();
    let coins = [Decimal::new(25, 2)];
    for _ in 0..100 {
        engine.deposit("1002", &coins).expect("Deposit failed");
    }
}
