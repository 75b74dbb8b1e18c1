//! Domain models for the double-auction engine

pub mod order;
pub mod trade;
