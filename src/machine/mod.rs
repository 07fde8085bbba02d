//! The vending machine around the pure core.
//!
//! # Key Concepts
//!
//! - **Session**: the selected product and the balance inserted toward it
//! - **Sale**: select, pay, then collect the product and change
//! - **Atomicity**: dispense and refund are planned in full before any stock
//!   moves, so every rejection leaves the machine exactly as it was
//!
//! The machine is single-threaded. Callers that share one between threads
//! must serialize access themselves, for example behind one `Mutex`.

pub mod error;
mod session;
mod stats;
mod vending;

pub use error::VendingError;
pub use session::SessionState;
pub use stats::MachineStats;
pub use vending::{Dispensed, VendingMachine};
