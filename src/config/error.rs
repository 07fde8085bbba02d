//! Configuration error types.

use crate::core::{Coin, Product};
use thiserror::Error;

/// A single stocking entry that breaks the configured limits
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockViolation {
    #[error("{quantity} {coin} coins exceed the coin tube capacity of {capacity}")]
    CoinOverCapacity {
        coin: Coin,
        quantity: u32,
        capacity: u32,
    },

    #[error("{quantity} units of {product} exceed the slot capacity of {capacity}")]
    ProductOverCapacity {
        product: Product,
        quantity: u32,
        capacity: u32,
    },

    #[error("{limit} capacity must be greater than zero")]
    ZeroCapacity { limit: &'static str },
}

/// Errors that can occur while loading a machine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but the stocking is not acceptable
    #[error("Machine config has {} violation(s)", .violations.len())]
    Invalid { violations: Vec<StockViolation> },
}
