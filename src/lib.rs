//! Coinvend: a coin-operated vending machine core
//!
//! A customer selects a product, inserts coins and either collects the
//! product with change or asks for a refund. The crate keeps the parts with
//! real invariants small and pure:
//!
//! - **Inventory**: counts never go negative
//! - **Change**: greedy, largest coin first, limited by what the drawer holds
//!   and always exact
//! - **Sale**: atomic; a rejected dispense or refund changes nothing
//!
//! # Example
//!
//! ```rust
//! use coinvend::{Coin, Product, VendingError, VendingMachine};
//!
//! let mut machine = VendingMachine::default();
//!
//! machine.select_and_get_price(Product::Pepsi).unwrap();
//! machine.insert_coin(Coin::Quarter);
//!
//! assert_eq!(
//!     machine.collect_item_and_change(),
//!     Err(VendingError::PaymentIncomplete { remaining: 10 })
//! );
//!
//! machine.insert_coin(Coin::Quarter);
//! let dispensed = machine.collect_item_and_change().unwrap();
//! assert_eq!(dispensed.change, vec![Coin::Dime, Coin::Nickel]);
//! ```

pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use config::{ConfigError, MachineConfig};
pub use self::core::{Coin, Inventory, Product};
pub use machine::{Dispensed, VendingError, VendingMachine};
