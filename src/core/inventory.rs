//! Key-counted stock used for both coins and products.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from a key to a non-negative count.
///
/// Keys that were never stocked report a quantity of zero. Counts are
/// unsigned, and [`Inventory::deduct`] refuses to go below zero.
///
/// # Example
///
/// ```rust
/// use coinvend::core::{Coin, Inventory};
///
/// let mut cash = Inventory::new();
/// cash.set(Coin::Dime, 2);
/// cash.add(Coin::Dime);
/// assert_eq!(cash.quantity(&Coin::Dime), 3);
/// assert!(!cash.has(&Coin::Penny));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory<K: Ord> {
    counts: BTreeMap<K, u32>,
}

impl<K: Ord> Default for Inventory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Inventory<K> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Stored count, or 0 for a key that was never set.
    pub fn quantity(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn has(&self, key: &K) -> bool {
        self.quantity(key) > 0
    }

    /// Add one unit. A count already at `u32::MAX` stays there.
    pub fn add(&mut self, key: K) {
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Remove one unit if any is in stock.
    ///
    /// Returns `false` and leaves the inventory unchanged when the key is
    /// out of stock.
    pub fn deduct(&mut self, key: &K) -> bool {
        match self.counts.get_mut(key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => {
                tracing::warn!("deduct requested on an empty inventory slot");
                false
            }
        }
    }

    /// Overwrite the count for a key.
    pub fn set(&mut self, key: K, quantity: u32) {
        self.counts.insert(key, quantity);
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Stocked keys with their counts, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u32)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// Sum of all counts.
    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|count| u64::from(*count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_units() == 0
    }
}

impl<K: Ord + Clone> Inventory<K> {
    /// Copy the counts out as a plain map.
    pub fn to_map(&self) -> BTreeMap<K, u32> {
        self.counts.clone()
    }
}

impl<K: Ord> FromIterator<(K, u32)> for Inventory<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
