//! Common types and utilities for the double-auction engine
//!
//! This library contains the boundary types shared by the matching engine and
//! anything that drives it: the order and trade models, fixed-point price
//! helpers and a unified error type.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;
