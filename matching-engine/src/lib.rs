//! Continuous double-auction matching engine
//!
//! Each side of the market is a binary heap of resting limit orders ordered by
//! price, then by arrival. Incoming orders walk the opposite heap best-first
//! and execute at the resting order's price.

pub mod heap;
mod order_book;
pub mod engine;

pub use engine::{crosses, MatchingEngine, ProcessedOrder, Remainder};
pub use heap::{PeekMut, PriorityQueue};
pub use order_book::{comparator, OpenOrder, OrderBook, OrderComparator};
