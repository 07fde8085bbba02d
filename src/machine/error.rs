//! Rejections raised by the vending machine.

use crate::core::{InsufficientChange, Product};
use thiserror::Error;

/// A rejected vending operation.
///
/// None of these leave the machine in a changed state; the caller can
/// retry, pick another product, insert more coins or ask for a refund.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendingError {
    #[error("Sorry, {product} is out of stock. Please choose another product")]
    SoldOut { product: Product },

    #[error("Price not fully paid, remaining: {remaining}")]
    PaymentIncomplete { remaining: u64 },

    #[error(transparent)]
    InsufficientChange(#[from] InsufficientChange),

    #[error("No product selected")]
    NoSelection,
}
