//! Vending machine that runs one sale at a time.

use crate::config::{ConfigError, MachineConfig, StockLimits};
use crate::core::{make_change, Coin, Inventory, Product, SaleRecord, SalesLedger};
use crate::machine::error::VendingError;
use crate::machine::session::{Session, SessionState};
use crate::machine::stats::MachineStats;
use chrono::Utc;

/// What the customer takes away from a completed sale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispensed {
    pub product: Product,
    pub change: Vec<Coin>,
}

/// Every mutation a sale needs, worked out before any of it is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SalePlan {
    product: Product,
    price: u64,
    change: Vec<Coin>,
}

/// Coin-operated vending machine.
///
/// Owns the change drawer, the product slots, the current session and the
/// sales ledger. Dispense and refund first plan the full outcome against the
/// current stock and only then apply it, so a rejected call changes nothing.
///
/// # Example
///
/// ```rust
/// use coinvend::core::{Coin, Product};
/// use coinvend::machine::VendingMachine;
///
/// let mut machine = VendingMachine::default();
///
/// let price = machine.select_and_get_price(Product::Soda).unwrap();
/// assert_eq!(price, 45);
///
/// machine.insert_coin(Coin::Quarter);
/// machine.insert_coin(Coin::Quarter);
///
/// let dispensed = machine.collect_item_and_change().unwrap();
/// assert_eq!(dispensed.product, Product::Soda);
/// assert_eq!(dispensed.change, vec![Coin::Nickel]);
/// assert_eq!(machine.total_sales(), 45);
/// ```
#[derive(Clone, Debug)]
pub struct VendingMachine {
    cash: Inventory<Coin>,
    items: Inventory<Product>,
    session: Session,
    ledger: SalesLedger,
    limits: StockLimits,
}

impl Default for VendingMachine {
    /// A machine stocked with the factory configuration.
    fn default() -> Self {
        let mut machine = Self::unstocked();
        machine.load(&MachineConfig::default());
        machine
    }
}

impl VendingMachine {
    /// Create a machine stocked from `config`.
    /// Returns an error if the config breaks its own stocking limits.
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        config.ensure_valid()?;
        let mut machine = Self::unstocked();
        machine.load(&config);
        Ok(machine)
    }

    fn unstocked() -> Self {
        Self {
            cash: Inventory::new(),
            items: Inventory::new(),
            session: Session::default(),
            ledger: SalesLedger::new(),
            limits: StockLimits::default(),
        }
    }

    fn load(&mut self, config: &MachineConfig) {
        self.limits = config.limits;
        for (coin, quantity) in &config.coins {
            self.cash.set(*coin, *quantity);
        }
        for (product, quantity) in &config.products {
            self.items.set(*product, *quantity);
        }
        tracing::debug!(
            coins = self.cash.total_units(),
            products = self.items.total_units(),
            "machine stocked"
        );
    }

    /// Select a product and learn its price.
    ///
    /// Neither stock nor balance is touched: stock moves only when the sale
    /// completes, and coins already inserted count toward the new selection.
    pub fn select_and_get_price(&mut self, product: Product) -> Result<u64, VendingError> {
        if !self.items.has(&product) {
            tracing::warn!(%product, "selection rejected: sold out");
            return Err(VendingError::SoldOut { product });
        }

        self.session.select(product);
        tracing::debug!(%product, price = product.price(), "product selected");
        Ok(product.price())
    }

    /// Accept a coin. The coin goes straight into the change drawer.
    pub fn insert_coin(&mut self, coin: Coin) {
        self.session.credit(coin);
        self.cash.add(coin);
        tracing::debug!(%coin, balance = self.session.balance(), "coin inserted");
    }

    /// Complete the sale for the selected product.
    ///
    /// Fails with `NoSelection`, `SoldOut`, `PaymentIncomplete` or
    /// `InsufficientChange` without changing any state. The slot is checked
    /// again here since it may have been emptied after selection.
    pub fn collect_item_and_change(&mut self) -> Result<Dispensed, VendingError> {
        let plan = self.plan_sale().inspect_err(|err| {
            tracing::warn!(%err, balance = self.session.balance(), "sale rejected");
        })?;
        Ok(self.apply_sale(plan))
    }

    fn plan_sale(&self) -> Result<SalePlan, VendingError> {
        let product = self.session.selected().ok_or(VendingError::NoSelection)?;
        if !self.items.has(&product) {
            return Err(VendingError::SoldOut { product });
        }
        let price = product.price();
        let balance = self.session.balance();

        if balance < price {
            return Err(VendingError::PaymentIncomplete {
                remaining: price - balance,
            });
        }

        let change = make_change(balance - price, &self.cash)?;
        Ok(SalePlan {
            product,
            price,
            change,
        })
    }

    fn apply_sale(&mut self, plan: SalePlan) -> Dispensed {
        self.items.deduct(&plan.product);
        self.pay_out(&plan.change);
        self.ledger.record(SaleRecord {
            product: plan.product,
            price: plan.price,
            change: plan.change.clone(),
            sold_at: Utc::now(),
        });
        self.session.clear();

        tracing::info!(
            product = %plan.product,
            price = plan.price,
            change_coins = plan.change.len(),
            total_sales = self.ledger.total_sales(),
            "sale completed"
        );

        Dispensed {
            product: plan.product,
            change: plan.change,
        }
    }

    /// Return the whole balance and drop the selection.
    ///
    /// Fails with `InsufficientChange` without changing any state.
    pub fn refund(&mut self) -> Result<Vec<Coin>, VendingError> {
        let balance = self.session.balance();
        let coins = make_change(balance, &self.cash).map_err(|err| {
            tracing::warn!(%err, balance, "refund rejected");
            VendingError::from(err)
        })?;

        self.pay_out(&coins);
        self.session.clear();
        tracing::info!(amount = balance, coins = coins.len(), "balance refunded");
        Ok(coins)
    }

    fn pay_out(&mut self, coins: &[Coin]) {
        for coin in coins {
            self.cash.deduct(coin);
        }
    }

    /// Empty the machine: both inventories, the ledger and the session.
    ///
    /// Every product is sold out afterwards until restocked.
    pub fn reset(&mut self) {
        self.cash.clear();
        self.items.clear();
        self.ledger.clear();
        self.session.clear();
        tracing::info!("machine reset");
    }

    /// Load the stocking from `config`, overwriting the listed entries.
    /// The config's limits replace the machine's.
    pub fn restock(&mut self, config: &MachineConfig) -> Result<(), ConfigError> {
        config.ensure_valid()?;
        self.load(config);
        Ok(())
    }

    /// Set the number of units in a product slot.
    /// Rejected without change if `quantity` exceeds the product capacity.
    pub fn stock_product(&mut self, product: Product, quantity: u32) -> Result<(), ConfigError> {
        self.limits.check_product(product, quantity)?;
        self.items.set(product, quantity);
        Ok(())
    }

    /// Set the number of coins in a change tube.
    /// Rejected without change if `quantity` exceeds the coin capacity.
    pub fn stock_coins(&mut self, coin: Coin, quantity: u32) -> Result<(), ConfigError> {
        self.limits.check_coins(coin, quantity)?;
        self.cash.set(coin, quantity);
        Ok(())
    }

    pub fn total_sales(&self) -> u64 {
        self.ledger.total_sales()
    }

    pub fn balance(&self) -> u64 {
        self.session.balance()
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.session.selected()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn item_stock(&self, product: Product) -> u32 {
        self.items.quantity(&product)
    }

    pub fn coin_stock(&self, coin: Coin) -> u32 {
        self.cash.quantity(&coin)
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Snapshot of revenue and stock for reporting.
    pub fn stats(&self) -> MachineStats {
        MachineStats {
            total_sales: self.ledger.total_sales(),
            sales_count: self.ledger.sales_count(),
            balance: self.session.balance(),
            items: self.items.to_map(),
            cash: self.cash.to_map(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InsufficientChange;

    #[test]
    fn exact_price_gives_no_change() {
        let mut machine = VendingMachine::default();

        assert_eq!(machine.select_and_get_price(Product::Coke), Ok(25));
        machine.insert_coin(Coin::Quarter);

        let dispensed = machine.collect_item_and_change().unwrap();
        assert_eq!(dispensed.product, Product::Coke);
        assert!(dispensed.change.is_empty());
        assert_eq!(machine.item_stock(Product::Coke), 4);
        assert_eq!(machine.coin_stock(Coin::Quarter), 6);
    }

    #[test]
    fn overpayment_returns_change_from_stock() {
        let mut machine = VendingMachine::default();

        machine.select_and_get_price(Product::Coke).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.insert_coin(Coin::Quarter);

        let dispensed = machine.collect_item_and_change().unwrap();
        assert_eq!(dispensed.change, vec![Coin::Quarter]);
        // 5 stocked + 2 inserted - 1 returned
        assert_eq!(machine.coin_stock(Coin::Quarter), 6);
    }

    #[test]
    fn sale_clears_session_and_books_revenue() {
        let mut machine = VendingMachine::default();

        machine.select_and_get_price(Product::Pepsi).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.insert_coin(Coin::Dime);
        machine.collect_item_and_change().unwrap();

        assert_eq!(machine.session_state(), SessionState::Idle);
        assert_eq!(machine.balance(), 0);
        assert_eq!(machine.total_sales(), 35);
        assert_eq!(machine.ledger().units_sold(Product::Pepsi), 1);
    }

    #[test]
    fn select_on_empty_slot_is_sold_out() {
        let mut machine = VendingMachine::default();
        machine.stock_product(Product::Soda, 0).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.insert_coin(Coin::Quarter);

        assert_eq!(
            machine.select_and_get_price(Product::Soda),
            Err(VendingError::SoldOut {
                product: Product::Soda
            })
        );
        assert_eq!(machine.session_state(), SessionState::Idle);
        assert_eq!(machine.balance(), 50);
    }

    #[test]
    fn select_does_not_deduct_stock() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Coke).unwrap();
        machine.select_and_get_price(Product::Coke).unwrap();

        assert_eq!(machine.item_stock(Product::Coke), 5);
    }

    #[test]
    fn reselection_keeps_balance() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Soda).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.select_and_get_price(Product::Coke).unwrap();

        let dispensed = machine.collect_item_and_change().unwrap();
        assert_eq!(dispensed.product, Product::Coke);
        assert!(dispensed.change.is_empty());
    }

    #[test]
    fn underpayment_reports_remaining_and_changes_nothing() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Soda).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.insert_coin(Coin::Dime);

        assert_eq!(
            machine.collect_item_and_change(),
            Err(VendingError::PaymentIncomplete { remaining: 10 })
        );
        assert_eq!(machine.balance(), 35);
        assert_eq!(machine.selected_product(), Some(Product::Soda));
        assert_eq!(machine.item_stock(Product::Soda), 5);
        assert_eq!(machine.total_sales(), 0);

        machine.insert_coin(Coin::Dime);
        assert!(machine.collect_item_and_change().is_ok());
    }

    #[test]
    fn collect_without_selection_is_rejected() {
        let mut machine = VendingMachine::default();
        machine.insert_coin(Coin::Quarter);

        assert_eq!(
            machine.collect_item_and_change(),
            Err(VendingError::NoSelection)
        );
        assert_eq!(machine.balance(), 25);
    }

    #[test]
    fn insufficient_change_leaves_state_untouched() {
        let mut machine = VendingMachine::new(
            MachineConfig::empty().with_product(Product::Soda, 2),
        )
        .unwrap();

        machine.select_and_get_price(Product::Soda).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.insert_coin(Coin::Quarter);

        let before = machine.stats();
        let err = machine.collect_item_and_change().unwrap_err();

        assert_eq!(
            err,
            VendingError::InsufficientChange(InsufficientChange {
                requested: 5,
                unmet: 5
            })
        );
        let after = machine.stats();
        assert_eq!(after.items, before.items);
        assert_eq!(after.cash, before.cash);
        assert_eq!(after.total_sales, 0);
        assert_eq!(machine.balance(), 50);
        assert_eq!(machine.selected_product(), Some(Product::Soda));
    }

    #[test]
    fn refund_returns_balance_and_clears_selection() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Pepsi).unwrap();
        machine.insert_coin(Coin::Dime);
        machine.insert_coin(Coin::Nickel);
        machine.insert_coin(Coin::Penny);
        machine.insert_coin(Coin::Quarter);

        let coins = machine.refund().unwrap();

        assert_eq!(
            coins,
            vec![Coin::Quarter, Coin::Dime, Coin::Nickel, Coin::Penny]
        );
        assert_eq!(machine.session_state(), SessionState::Idle);
        assert_eq!(machine.balance(), 0);
        assert_eq!(machine.total_sales(), 0);
        for coin in Coin::ALL {
            assert_eq!(machine.coin_stock(coin), 5);
        }
    }

    #[test]
    fn refund_of_nothing_is_empty() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Coke).unwrap();

        assert_eq!(machine.refund(), Ok(vec![]));
        assert_eq!(machine.selected_product(), None);
    }

    #[test]
    fn failed_refund_keeps_balance() {
        let mut machine =
            VendingMachine::new(MachineConfig::empty().with_product(Product::Coke, 1)).unwrap();
        machine.select_and_get_price(Product::Coke).unwrap();
        machine.insert_coin(Coin::Dime);
        machine.stock_coins(Coin::Dime, 0).unwrap();

        assert!(matches!(
            machine.refund(),
            Err(VendingError::InsufficientChange(_))
        ));
        assert_eq!(machine.balance(), 10);
        assert_eq!(machine.selected_product(), Some(Product::Coke));
    }

    #[test]
    fn reset_empties_machine() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Coke).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine.collect_item_and_change().unwrap();
        machine.insert_coin(Coin::Dime);

        machine.reset();

        assert_eq!(machine.total_sales(), 0);
        assert_eq!(machine.balance(), 0);
        assert!(machine.ledger().sales().is_empty());
        for product in Product::ALL {
            assert_eq!(
                machine.select_and_get_price(product),
                Err(VendingError::SoldOut { product })
            );
        }
        for coin in Coin::ALL {
            assert_eq!(machine.coin_stock(coin), 0);
        }
    }

    #[test]
    fn restock_after_reset_reopens_sales() {
        let mut machine = VendingMachine::default();
        machine.reset();

        machine.restock(&MachineConfig::default()).unwrap();

        assert_eq!(machine.select_and_get_price(Product::Pepsi), Ok(35));
    }

    #[test]
    fn slot_emptied_after_selection_is_sold_out_at_collect() {
        let mut machine = VendingMachine::default();
        machine.select_and_get_price(Product::Coke).unwrap();
        machine.insert_coin(Coin::Quarter);
        machine
            .restock(&MachineConfig::empty().with_product(Product::Coke, 0))
            .unwrap();

        assert_eq!(
            machine.collect_item_and_change(),
            Err(VendingError::SoldOut {
                product: Product::Coke
            })
        );
        assert_eq!(machine.total_sales(), 0);
        assert!(machine.ledger().sales().is_empty());
        assert_eq!(machine.balance(), 25);
        assert_eq!(machine.selected_product(), Some(Product::Coke));

        machine.stock_product(Product::Coke, 1).unwrap();
        assert!(machine.collect_item_and_change().is_ok());
        assert_eq!(machine.item_stock(Product::Coke), 0);
    }

    #[test]
    fn stocking_above_capacity_is_rejected() {
        let mut machine = VendingMachine::default();

        assert!(matches!(
            machine.stock_coins(Coin::Penny, 101),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            machine.stock_product(Product::Pepsi, 21),
            Err(ConfigError::Invalid { .. })
        ));
        assert_eq!(machine.coin_stock(Coin::Penny), 5);
        assert_eq!(machine.item_stock(Product::Pepsi), 5);

        machine.stock_coins(Coin::Penny, 100).unwrap();
        assert_eq!(machine.coin_stock(Coin::Penny), 100);
    }

    #[test]
    fn stocking_follows_configured_limits() {
        let limits = StockLimits {
            coin_capacity: 3,
            product_capacity: 2,
        };
        let mut machine = VendingMachine::new(MachineConfig::empty().with_limits(limits)).unwrap();

        assert!(machine.stock_coins(Coin::Dime, 4).is_err());
        assert!(machine.stock_product(Product::Soda, 3).is_err());
        machine.stock_coins(Coin::Dime, 3).unwrap();
        machine.stock_product(Product::Soda, 2).unwrap();
    }

    #[test]
    fn insert_into_full_tube_does_not_overflow() {
        let limits = StockLimits {
            coin_capacity: u32::MAX,
            product_capacity: 20,
        };
        let mut machine = VendingMachine::new(MachineConfig::empty().with_limits(limits)).unwrap();
        machine.stock_coins(Coin::Quarter, u32::MAX).unwrap();

        machine.insert_coin(Coin::Quarter);

        assert_eq!(machine.balance(), 25);
        assert_eq!(machine.coin_stock(Coin::Quarter), u32::MAX);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = MachineConfig::default().with_coins(Coin::Penny, 1_000);
        assert!(matches!(
            VendingMachine::new(config),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
