//! Machine configuration: initial stocking and stocking limits.
//!
//! Coins and products themselves are fixed; what varies per machine is how
//! many of each are loaded. Configurations are plain serde data and can be
//! read from TOML:
//!
//! ```rust
//! use coinvend::config::MachineConfig;
//! use coinvend::core::{Coin, Product};
//!
//! let config = MachineConfig::from_toml_str(
//!     r#"
//!     [coins]
//!     quarter = 10
//!     dime = 4
//!
//!     [products]
//!     coke = 3
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.coins[&Coin::Quarter], 10);
//! assert_eq!(config.products[&Product::Coke], 3);
//! assert!(!config.products.contains_key(&Product::Soda));
//! ```

use crate::core::{Coin, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;
mod validation;

pub use error::{ConfigError, StockViolation};

/// Units of every coin and product in the factory configuration
pub const DEFAULT_STOCK: u32 = 5;

/// Upper bounds for a single coin tube or product slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockLimits {
    pub coin_capacity: u32,
    pub product_capacity: u32,
}

impl Default for StockLimits {
    fn default() -> Self {
        Self {
            coin_capacity: 100,
            product_capacity: 20,
        }
    }
}

/// Initial stocking for a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Coins loaded into the change drawer
    #[serde(default)]
    pub coins: BTreeMap<Coin, u32>,

    /// Units loaded per product slot
    #[serde(default)]
    pub products: BTreeMap<Product, u32>,

    #[serde(default)]
    pub limits: StockLimits,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            coins: Coin::ALL.iter().map(|coin| (*coin, DEFAULT_STOCK)).collect(),
            products: Product::ALL
                .iter()
                .map(|product| (*product, DEFAULT_STOCK))
                .collect(),
            limits: StockLimits::default(),
        }
    }
}

impl MachineConfig {
    /// A configuration with nothing stocked.
    pub fn empty() -> Self {
        Self {
            coins: BTreeMap::new(),
            products: BTreeMap::new(),
            limits: StockLimits::default(),
        }
    }

    pub fn with_coins(mut self, coin: Coin, quantity: u32) -> Self {
        self.coins.insert(coin, quantity);
        self
    }

    pub fn with_product(mut self, product: Product, quantity: u32) -> Self {
        self.products.insert(product, quantity);
        self
    }

    pub fn with_limits(mut self, limits: StockLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse a TOML document and check it against its limits.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = toml::from_str(source)?;
        config.ensure_valid()?;
        Ok(config)
    }
}
