//! Order models and related types

use serde::{Deserialize, Serialize};

use crate::decimal::{Price, Quantity};
use crate::error::{Error, Result};

/// Identifier assigned to every processed order, starting at 1
pub type OrderId = u64;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an order of this side trades against
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Worst price an order accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLimit {
    /// Any price is acceptable (market orders)
    Unbounded,
    /// Buy at or below / sell at or above this price
    At(Price),
}

/// Incoming order, immutable once submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Order {
    /// Order to be executed at the specified price or better; any remainder rests on the book
    Limit {
        side: Side,
        quantity: Quantity,
        limit: Price,
    },
    /// Order to be executed immediately at whatever prices the book offers
    Market {
        side: Side,
        quantity: Quantity,
    },
}

impl Order {
    /// Create a new limit order
    pub fn limit(side: Side, quantity: Quantity, limit: Price) -> Self {
        Order::Limit { side, quantity, limit }
    }

    /// Create a new market order
    pub fn market(side: Side, quantity: Quantity) -> Self {
        Order::Market { side, quantity }
    }

    pub fn side(&self) -> Side {
        match self {
            Order::Limit { side, .. } | Order::Market { side, .. } => *side,
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            Order::Limit { quantity, .. } | Order::Market { quantity, .. } => *quantity,
        }
    }

    /// Whether the unfilled part of this order may rest on the book
    pub fn is_limit(&self) -> bool {
        matches!(self, Order::Limit { .. })
    }

    /// Effective price limit used by the crossing test
    pub fn price_limit(&self) -> PriceLimit {
        match self {
            Order::Limit { limit, .. } => PriceLimit::At(*limit),
            Order::Market { .. } => PriceLimit::Unbounded,
        }
    }

    /// Reject orders the matching loop cannot handle
    pub fn validate(&self) -> Result<()> {
        if self.quantity() == 0 {
            return Err(Error::InvalidOrder("quantity must be positive".to_string()));
        }
        if let Order::Limit { limit, .. } = self {
            if *limit <= Price::ZERO {
                return Err(Error::InvalidOrder(format!(
                    "limit price must be positive, got {}",
                    limit
                )));
            }
        }
        Ok(())
    }
}
