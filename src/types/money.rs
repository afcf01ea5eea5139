//! Money-related types for the Teller Engine
//!
//! This module defines the coin denominations accepted at the counter and
//! the configurable limits that govern balance-changing operations.

use rust_decimal::Decimal;

/// Coin denominations accepted for deposits and withdrawals
///
/// The teller only handles three physical coins. Any other value offered
/// at the counter is rejected coin-by-coin rather than failing the whole
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    /// 0.05
    Nickel,
    /// 0.10
    Dime,
    /// 0.25
    Quarter,
}

impl Denomination {
    /// All denominations, smallest first
    pub const ALL: [Denomination; 3] = [
        Denomination::Nickel,
        Denomination::Dime,
        Denomination::Quarter,
    ];

    /// Monetary value of this coin
    pub fn value(&self) -> Decimal {
        match self {
            Denomination::Nickel => Decimal::new(5, 2),
            Denomination::Dime => Decimal::new(10, 2),
            Denomination::Quarter => Decimal::new(25, 2),
        }
    }

    /// Classify a raw amount as a coin, if it matches one exactly
    ///
    /// # Arguments
    ///
    /// * `value` - The candidate amount (any scale; 0.050 matches 0.05)
    ///
    /// # Returns
    ///
    /// The matching denomination, or `None` for anything that is not a
    /// recognized coin.
    pub fn from_value(value: Decimal) -> Option<Self> {
        Denomination::ALL.into_iter().find(|d| d.value() == value)
    }
}

/// Check whether an amount can be paid out in coins
///
/// Transfers accept any positive multiple of the smallest coin (0.05),
/// which covers every denomination and every sum of denominations.
pub fn is_coin_multiple(amount: Decimal) -> bool {
    let step = Denomination::Nickel.value();
    amount > Decimal::ZERO && (amount % step).is_zero()
}

/// Operational limits applied by the engine
///
/// Injected at engine construction so tests can tighten or loosen them;
/// `Default` gives the standard counter policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Balance every account must retain after any user-initiated operation
    pub minimum_balance: Decimal,

    /// Maximum cumulative amount one account may withdraw per calendar day
    pub daily_withdrawal_cap: Decimal,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            minimum_balance: Decimal::new(5, 2),
            daily_withdrawal_cap: Decimal::new(90, 2),
        }
    }
}
