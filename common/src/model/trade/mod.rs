//! Trade models and related types

use serde::{Deserialize, Serialize};

use crate::decimal::{notional, Amount, Price, Quantity};
use crate::error::Result;
use crate::model::order::OrderId;

/// Trade model representing one fill between a buy and a sell order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Buyer order ID
    pub buy_order_id: OrderId,
    /// Seller order ID
    pub sell_order_id: OrderId,
    /// Quantity traded
    pub quantity: Quantity,
    /// Price at which the trade executed (the resting order's limit)
    pub price: Price,
}

impl Trade {
    /// Create a new trade from matched orders
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            quantity,
            price,
        }
    }

    /// Total amount (price * quantity), or an error if it overflows a `Decimal`
    pub fn amount(&self) -> Result<Amount> {
        notional(self.price, self.quantity)
    }
}
