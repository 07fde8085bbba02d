//! Vending Session
//!
//! This demo walks one machine through a day of customers.
//!
//! Key concepts:
//! - Selecting, paying and collecting change
//! - Recoverable rejections (underpayment, sold out, no change)
//! - Refunds and the end-of-day stats report
//!
//! Run with: cargo run --example vending_session
//! Set RUST_LOG=coinvend=debug to see every coin.

use coinvend::core::{change_total, Coin, Product};
use coinvend::{MachineConfig, VendingError, VendingMachine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coinvend=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn buy(machine: &mut VendingMachine, product: Product, coins: &[Coin]) {
    println!("Customer wants {product}");

    let price = match machine.select_and_get_price(product) {
        Ok(price) => price,
        Err(err) => {
            println!("  {err}");
            return;
        }
    };
    println!("  Price: {price}");

    for coin in coins {
        machine.insert_coin(*coin);
    }

    match machine.collect_item_and_change() {
        Ok(dispensed) => println!(
            "  Got {} and {} in change {:?}",
            dispensed.product,
            change_total(&dispensed.change),
            dispensed.change
        ),
        Err(VendingError::PaymentIncomplete { remaining }) => {
            println!("  Still owes {remaining}, giving up");
            refund(machine);
        }
        Err(err) => {
            println!("  {err}");
            refund(machine);
        }
    }
}

fn refund(machine: &mut VendingMachine) {
    match machine.refund() {
        Ok(coins) => println!("  Refunded {} as {coins:?}", change_total(&coins)),
        Err(err) => println!("  Refund failed: {err}"),
    }
}

fn main() {
    init_logging();
    println!("=== Vending Session Demo ===\n");

    let config = MachineConfig::default()
        .with_coins(Coin::Nickel, 1)
        .with_coins(Coin::Penny, 2)
        .with_product(Product::Pepsi, 1);

    let mut machine = match VendingMachine::new(config) {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("Bad machine config: {err}");
            return;
        }
    };

    buy(&mut machine, Product::Coke, &[Coin::Quarter]);
    buy(&mut machine, Product::Soda, &[Coin::Quarter, Coin::Quarter]);
    buy(&mut machine, Product::Pepsi, &[Coin::Quarter]);
    buy(&mut machine, Product::Pepsi, &[Coin::Quarter, Coin::Dime]);
    buy(&mut machine, Product::Pepsi, &[Coin::Quarter, Coin::Dime]);
    buy(&mut machine, Product::Soda, &[Coin::Quarter, Coin::Quarter]);

    println!("\n=== End of day ===");
    let stats = machine.stats();
    println!("Total sales: {}", stats.total_sales);
    println!("Sales: {}", stats.sales_count);
    println!("Cash in drawer: {}", stats.cash_value());
    println!("Items: {:?}", stats.items);
    println!("Cash: {:?}", stats.cash);
}
