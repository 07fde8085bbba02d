//! Record of completed sales.
//!
//! The ledger only grows between resets: every completed sale is appended
//! and its price added to the running revenue total.

use super::catalog::{Coin, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single completed sale.
///
/// # Example
///
/// ```rust
/// use coinvend::core::{Coin, Product, SaleRecord};
/// use chrono::Utc;
///
/// let sale = SaleRecord {
///     product: Product::Soda,
///     price: Product::Soda.price(),
///     change: vec![Coin::Nickel],
///     sold_at: Utc::now(),
/// };
/// assert_eq!(sale.paid(), 50);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// The product handed out
    pub product: Product,
    /// Revenue taken for the sale
    pub price: u64,
    /// Coins returned to the customer
    pub change: Vec<Coin>,
    /// When the sale completed
    pub sold_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Amount the customer had inserted: price plus change returned.
    pub fn paid(&self) -> u64 {
        self.price + super::change::change_total(&self.change)
    }
}

/// Ordered list of completed sales with a running revenue total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesLedger {
    sales: Vec<SaleRecord>,
    total_sales: u64,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed sale.
    pub fn record(&mut self, sale: SaleRecord) {
        self.total_sales += sale.price;
        self.sales.push(sale);
    }

    /// Revenue taken since construction or the last reset.
    pub fn total_sales(&self) -> u64 {
        self.total_sales
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn sales_count(&self) -> usize {
        self.sales.len()
    }

    /// How many units of `product` have been sold.
    pub fn units_sold(&self, product: Product) -> usize {
        self.sales
            .iter()
            .filter(|sale| sale.product == product)
            .count()
    }

    pub(crate) fn clear(&mut self) {
        self.sales.clear();
        self.total_sales = 0;
    }
}
