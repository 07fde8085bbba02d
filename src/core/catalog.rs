//! Coin denominations and vendible products.
//!
//! Both sets are fixed at compile time. Face values and prices are in cents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coin accepted by the machine.
///
/// Ordering follows face value, so `Coin::Penny < Coin::Quarter`.
///
/// # Example
///
/// ```rust
/// use coinvend::core::Coin;
///
/// assert_eq!(Coin::Dime.value(), 10);
/// assert_eq!(Coin::DESCENDING[0], Coin::Quarter);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Penny,
    Nickel,
    Dime,
    Quarter,
}

impl Coin {
    /// Every coin, smallest face value first.
    pub const ALL: [Coin; 4] = [Coin::Penny, Coin::Nickel, Coin::Dime, Coin::Quarter];

    /// Every coin, largest face value first. This is the order change is drawn in.
    pub const DESCENDING: [Coin; 4] = [Coin::Quarter, Coin::Dime, Coin::Nickel, Coin::Penny];

    /// Face value in cents.
    pub const fn value(self) -> u64 {
        match self {
            Self::Penny => 1,
            Self::Nickel => 5,
            Self::Dime => 10,
            Self::Quarter => 25,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Penny => "penny",
            Self::Nickel => "nickel",
            Self::Dime => "dime",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A product the machine can vend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Coke,
    Pepsi,
    Soda,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::Coke, Product::Pepsi, Product::Soda];

    /// Price in cents.
    pub const fn price(self) -> u64 {
        match self {
            Self::Coke => 25,
            Self::Pepsi => 35,
            Self::Soda => 45,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Coke => "coke",
            Self::Pepsi => "pepsi",
            Self::Soda => "soda",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
