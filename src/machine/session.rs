//! The single in-flight transaction.

use crate::core::{Coin, Product};
use serde::{Deserialize, Serialize};

/// Where the current customer is in the purchase cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No product selected
    Idle,
    /// A product is selected and coins are being collected
    AwaitingPayment { product: Product },
}

impl SessionState {
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::AwaitingPayment { .. } => "AwaitingPayment",
        }
    }
}

/// Selected product and the money inserted toward it.
///
/// Selecting a product does not touch the balance, so coins inserted before
/// a (re)selection carry over to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Session {
    selected: Option<Product>,
    balance: u64,
}

impl Session {
    pub fn state(&self) -> SessionState {
        match self.selected {
            Some(product) => SessionState::AwaitingPayment { product },
            None => SessionState::Idle,
        }
    }

    pub fn selected(&self) -> Option<Product> {
        self.selected
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub(crate) fn select(&mut self, product: Product) {
        self.selected = Some(product);
    }

    pub(crate) fn credit(&mut self, coin: Coin) {
        self.balance += coin.value();
    }

    /// Back to `Idle` with nothing owed.
    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.balance = 0;
    }
}
