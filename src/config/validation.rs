//! Stocking checks for machine configurations.
//!
//! Checks accumulate: a configuration with several over-filled slots reports
//! every one of them, not just the first.

use super::error::{ConfigError, StockViolation};
use super::{MachineConfig, StockLimits};
use crate::core::{Coin, Product};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type StockCheck = Validation<(), NonEmptyVec<StockViolation>>;

fn capacity_is_positive(limit: &'static str, capacity: u32) -> StockCheck {
    if capacity == 0 {
        Validation::fail(StockViolation::ZeroCapacity { limit })
    } else {
        Validation::success(())
    }
}

fn into_result(check: StockCheck) -> Result<(), ConfigError> {
    match check {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => {
            let violations: Vec<StockViolation> = errors.iter().cloned().collect();
            for violation in &violations {
                tracing::warn!(%violation, "rejected stocking");
            }
            Err(ConfigError::Invalid { violations })
        }
    }
}

impl StockLimits {
    fn coin_fits(&self, coin: Coin, quantity: u32) -> StockCheck {
        if quantity > self.coin_capacity {
            Validation::fail(StockViolation::CoinOverCapacity {
                coin,
                quantity,
                capacity: self.coin_capacity,
            })
        } else {
            Validation::success(())
        }
    }

    fn product_fits(&self, product: Product, quantity: u32) -> StockCheck {
        if quantity > self.product_capacity {
            Validation::fail(StockViolation::ProductOverCapacity {
                product,
                quantity,
                capacity: self.product_capacity,
            })
        } else {
            Validation::success(())
        }
    }

    /// Check a single coin tube fill against the coin capacity.
    pub fn check_coins(&self, coin: Coin, quantity: u32) -> Result<(), ConfigError> {
        into_result(self.coin_fits(coin, quantity))
    }

    /// Check a single product slot fill against the product capacity.
    pub fn check_product(&self, product: Product, quantity: u32) -> Result<(), ConfigError> {
        into_result(self.product_fits(product, quantity))
    }
}

impl MachineConfig {
    /// Check every stocking entry against the configured limits.
    /// Returns `Validation::Failure` with ALL violations if any entry fails.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<StockViolation>> {
        let mut checks: Vec<StockCheck> = vec![
            capacity_is_positive("coin", self.limits.coin_capacity),
            capacity_is_positive("product", self.limits.product_capacity),
        ];

        for (coin, quantity) in &self.coins {
            checks.push(self.limits.coin_fits(*coin, *quantity));
        }

        for (product, quantity) in &self.products {
            checks.push(self.limits.product_fits(*product, *quantity));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`MachineConfig::validate`] folded into a `Result` for `?` callers.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        into_result(self.validate())
    }
}
