//! Point-in-time report of revenue and stock.

use crate::core::{Coin, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot produced by [`VendingMachine::stats`](crate::machine::VendingMachine::stats).
///
/// Printing or shipping the report is up to the caller; the snapshot is
/// plain serde data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineStats {
    /// Revenue since construction or the last reset
    pub total_sales: u64,

    /// Number of completed sales
    pub sales_count: usize,

    /// Money inserted toward the current selection
    pub balance: u64,

    /// Units left per product slot
    pub items: BTreeMap<Product, u32>,

    /// Coins held per denomination
    pub cash: BTreeMap<Coin, u32>,

    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
}

impl MachineStats {
    /// Face value of every coin in the drawer.
    pub fn cash_value(&self) -> u64 {
        self.cash
            .iter()
            .map(|(coin, count)| coin.value() * u64::from(*count))
            .sum()
    }
}
