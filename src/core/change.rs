//! Change-making against a finite coin stock.
//!
//! Change is selected greedily, largest face value first, and limited by the
//! number of coins actually held. Selection is a pure query: the caller
//! removes the returned coins from stock as a separate step.

use super::catalog::Coin;
use super::inventory::Inventory;
use thiserror::Error;

/// The available coins cannot add up to the requested amount.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Not sufficient change: cannot return {requested} (short by {unmet})")]
pub struct InsufficientChange {
    /// Amount that was asked for
    pub requested: u64,
    /// Amount still owed when no further coin could be drawn
    pub unmet: u64,
}

/// Select coins summing exactly to `amount` from `cash`.
///
/// After each coin is taken the scan restarts from the largest denomination,
/// so the same coin may be drawn repeatedly while it is still in stock. A
/// coin already drawn by this call counts against its stock.
///
/// # Example
///
/// ```rust
/// use coinvend::core::{make_change, Coin, Inventory};
///
/// let cash: Inventory<Coin> = Coin::ALL.iter().map(|coin| (*coin, 5)).collect();
///
/// let change = make_change(41, &cash).unwrap();
/// assert_eq!(change, vec![Coin::Quarter, Coin::Dime, Coin::Nickel, Coin::Penny]);
///
/// assert!(make_change(0, &cash).unwrap().is_empty());
/// ```
pub fn make_change(amount: u64, cash: &Inventory<Coin>) -> Result<Vec<Coin>, InsufficientChange> {
    let mut change = Vec::new();
    let mut drawn = [0u32; Coin::DESCENDING.len()];
    let mut remaining = amount;

    while remaining > 0 {
        let next = Coin::DESCENDING
            .iter()
            .copied()
            .enumerate()
            .find(|&(slot, coin)| remaining >= coin.value() && cash.quantity(&coin) > drawn[slot]);

        let Some((slot, coin)) = next else {
            return Err(InsufficientChange {
                requested: amount,
                unmet: remaining,
            });
        };

        drawn[slot] += 1;
        remaining -= coin.value();
        change.push(coin);
    }

    Ok(change)
}

/// Total face value of a coin sequence.
pub fn change_total(coins: &[Coin]) -> u64 {
    coins.iter().map(|coin| coin.value()).sum()
}
