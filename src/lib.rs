// This is a metapackage for the workspace
// Re-export crates as modules

pub use common;
pub use matching_engine;

pub use common::model::order::{Order, OrderId, Side};
pub use common::model::trade::Trade;
pub use matching_engine::{MatchingEngine, ProcessedOrder, Remainder};
