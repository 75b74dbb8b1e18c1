//! Order book implementation for price-time priority matching

use std::cmp::Ordering;

use common::decimal::{Price, Quantity, TotalQuantity};
use common::model::order::{OrderId, Side};
use serde::{Deserialize, Serialize};

use crate::heap::{PeekMut, PriorityQueue};

/// A limit order resting on the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    /// Order ID assigned by the engine
    pub id: OrderId,
    /// Quantity still open; never zero while on the book
    pub quantity: Quantity,
    /// Limit price, also the price every fill against this order executes at
    pub limit: Price,
}

/// Ordering used by one side of the book
pub type OrderComparator = fn(&OpenOrder, &OpenOrder) -> Ordering;

/// Asks: lowest price first, then lowest id
fn compare_sell(a: &OpenOrder, b: &OpenOrder) -> Ordering {
    a.limit.cmp(&b.limit).then_with(|| a.id.cmp(&b.id))
}

/// Bids: highest price first, then lowest id
fn compare_buy(a: &OpenOrder, b: &OpenOrder) -> Ordering {
    b.limit.cmp(&a.limit).then_with(|| a.id.cmp(&b.id))
}

/// Price-time comparator for the given side
pub fn comparator(side: Side) -> OrderComparator {
    match side {
        Side::Buy => compare_buy,
        Side::Sell => compare_sell,
    }
}

/// Resting orders on one side of the market
#[derive(Debug, Clone)]
pub struct OrderBook {
    side: Side,
    orders: PriorityQueue<OpenOrder, OrderComparator>,
}

impl OrderBook {
    /// Create an empty book for the given side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orders: PriorityQueue::with_comparator(comparator(side)),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Best order: best price, earliest among equal prices
    pub fn peek_top(&self) -> Option<&OpenOrder> {
        self.orders.peek_top()
    }

    /// Mutable access to the best order
    pub fn peek_top_mut(&mut self) -> Option<PeekMut<'_, OpenOrder, OrderComparator>> {
        self.orders.peek_top_mut()
    }

    /// Remove and return the best order
    pub fn pop(&mut self) -> Option<OpenOrder> {
        self.orders.pop()
    }

    /// Add an order to the book
    pub fn push(&mut self, order: OpenOrder) {
        debug_assert!(order.quantity > 0, "order {} rests with zero quantity", order.id);
        self.orders.push(order);
    }

    /// Best price on this side
    pub fn best_price(&self) -> Option<Price> {
        self.peek_top().map(|order| order.limit)
    }

    /// Total open quantity across all resting orders
    pub fn total_quantity(&self) -> TotalQuantity {
        self.orders
            .iter()
            .map(|order| TotalQuantity::from(order.quantity))
            .sum()
    }

    /// Snapshot of all resting orders in matching priority
    pub fn orders(&self) -> Vec<OpenOrder> {
        let mut orders: Vec<OpenOrder> = self.orders.iter().copied().collect();
        orders.sort_by(comparator(self.side));
        orders
    }

    /// Aggregated quantity per price level, best level first (for market data)
    pub fn depth(&self, limit: usize) -> Vec<(Price, TotalQuantity)> {
        let mut levels: Vec<(Price, TotalQuantity)> = Vec::new();
        for order in self.orders() {
            let quantity = TotalQuantity::from(order.quantity);
            if let Some((price, total)) = levels.last_mut() {
                if *price == order.limit {
                    *total += quantity;
                    continue;
                }
            }
            if levels.len() == limit {
                break;
            }
            levels.push((order.limit, quantity));
        }
        levels
    }
}
