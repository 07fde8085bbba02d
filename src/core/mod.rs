//! Pure vending core.
//!
//! This module contains the parts of the machine that have no side effects
//! beyond their own state:
//! - The fixed coin and product catalog
//! - Key-counted inventories
//! - Greedy, stock-limited change-making
//! - The sales ledger

mod catalog;
mod change;
mod inventory;
mod ledger;

pub use catalog::{Coin, Product};
pub use change::{change_total, make_change, InsufficientChange};
pub use inventory::Inventory;
pub use ledger::{SaleRecord, SalesLedger};
