use common::decimal::{Price, Quantity};
use common::error::Result;
use common::model::order::{Order, OrderId, PriceLimit, Side};
use common::model::trade::Trade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::heap::PeekMut;
use crate::order_book::{OpenOrder, OrderBook};

/// What became of the quantity an order could not fill on arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "quantity", rename_all = "lowercase")]
pub enum Remainder {
    /// Nothing left over
    Filled,
    /// Limit order remainder now resting on the book
    Resting(Quantity),
    /// Market order remainder that found no liquidity and was dropped
    Discarded(Quantity),
}

impl Remainder {
    pub fn quantity(&self) -> Quantity {
        match self {
            Remainder::Filled => 0,
            Remainder::Resting(quantity) | Remainder::Discarded(quantity) => *quantity,
        }
    }
}

/// Result of a matching operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedOrder {
    /// ID assigned to the incoming order
    pub id: OrderId,
    /// Trades generated, in the order they were matched
    pub executed_trades: Vec<Trade>,
    /// Unfilled quantity and where it went
    pub remainder: Remainder,
}

impl ProcessedOrder {
    /// Quantity filled across all trades
    pub fn filled_quantity(&self) -> Quantity {
        self.executed_trades.iter().map(|trade| trade.quantity).sum()
    }
}

/// Whether a buy limit and a sell limit overlap
///
/// An unbounded limit crosses anything.
pub fn crosses(buy: PriceLimit, sell: PriceLimit) -> bool {
    match (buy, sell) {
        (PriceLimit::Unbounded, _) | (_, PriceLimit::Unbounded) => true,
        (PriceLimit::At(buy), PriceLimit::At(sell)) => buy >= sell,
    }
}

/// The matching engine responsible for processing orders and generating trades
///
/// Every call to [`MatchingEngine::process_order`] runs to completion before
/// the next one starts; share an engine across threads only behind a lock.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    /// ID handed to the next processed order
    next_order_id: OrderId,
    /// Buy side (bids)
    bids: OrderBook,
    /// Sell side (asks)
    asks: OrderBook,
    /// Last traded price
    last_price: Option<Price>,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create a new matching engine with empty books
    pub fn new() -> Self {
        info!("Creating matching engine");
        Self {
            next_order_id: 1,
            bids: OrderBook::new(Side::Buy),
            asks: OrderBook::new(Side::Sell),
            last_price: None,
        }
    }

    /// Process an incoming order
    ///
    /// Invalid orders are rejected before an ID is assigned and leave the
    /// engine untouched.
    pub fn process_order(&mut self, order: Order) -> Result<ProcessedOrder> {
        order.validate()?;

        let id = self.assign_order_id();
        let side = order.side();
        let price_limit = order.price_limit();
        let mut remaining = order.quantity();
        let mut executed_trades = Vec::new();

        debug!("Processing order {}: {:?}", id, order);

        // Buy orders cross against the asks and vice versa
        let opposite = self.book_mut(side.opposite());
        while remaining > 0 {
            let mut resting = match opposite.peek_top_mut() {
                Some(order) => order,
                None => break, // Nothing left to match against
            };

            let (buy_limit, sell_limit, buy_order_id, sell_order_id) = match side {
                Side::Buy => (price_limit, PriceLimit::At(resting.limit), id, resting.id),
                Side::Sell => (PriceLimit::At(resting.limit), price_limit, resting.id, id),
            };
            if !crosses(buy_limit, sell_limit) {
                break; // Best resting price is out of range, so is everything behind it
            }

            let fill = remaining.min(resting.quantity);
            let trade = Trade::new(buy_order_id, sell_order_id, fill, resting.limit);
            trace!("Order {} filled {} against order {} at {}", id, fill, resting.id, trade.price);
            executed_trades.push(trade);

            if remaining < resting.quantity {
                // Partially fill the resting order; it keeps its place in the book
                resting.quantity -= remaining;
                remaining = 0;
            } else {
                remaining -= resting.quantity;
                PeekMut::pop(resting);
            }
        }

        if let Some(trade) = executed_trades.last() {
            self.last_price = Some(trade.price);
        }

        let remainder = match order {
            _ if remaining == 0 => Remainder::Filled,
            Order::Limit { limit, .. } => {
                debug!("Adding remaining {} of limit order {} to the book", remaining, id);
                self.book_mut(side).push(OpenOrder {
                    id,
                    quantity: remaining,
                    limit,
                });
                Remainder::Resting(remaining)
            }
            Order::Market { .. } => {
                debug!("Discarding unfilled {} of market order {}", remaining, id);
                Remainder::Discarded(remaining)
            }
        };

        Ok(ProcessedOrder {
            id,
            executed_trades,
            remainder,
        })
    }

    /// ID the next processed order will receive
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Resting orders on one side
    pub fn book(&self, side: Side) -> &OrderBook {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Get the current spread
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => ask.checked_sub(bid),
            _ => None,
        }
    }

    /// Get the mid price, falling back to the last traded price
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            // Half the spread above the bid; ask + bid can overflow near Decimal::MAX
            (Some(ask), Some(bid)) => ask
                .checked_sub(bid)
                .and_then(|spread| bid.checked_add(spread / Decimal::TWO)),
            _ => self.last_price,
        }
    }

    /// Price of the most recent trade
    pub fn last_price(&self) -> Option<Price> {
        self.last_price
    }

    fn assign_order_id(&mut self) -> OrderId {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }

    fn book_mut(&mut self, side: Side) -> &mut OrderBook {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
