//! Configuration for the replay tool

use std::env;

use common::error::{Error, Result};

/// Default number of price levels printed per side
pub const DEFAULT_DEPTH_LEVELS: usize = 10;

/// Configuration for the replay tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Print aggregated book depth after the replay
    pub print_book: bool,
    /// Price levels per side when printing the book
    pub depth_levels: usize,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            print_book: false,
            depth_levels: DEFAULT_DEPTH_LEVELS,
            debug: false,
        }
    }
}

fn flag(value: &str) -> bool {
    value == "true" || value == "1"
}

impl ReplayConfig {
    /// Create a new configuration using environment variables
    ///
    /// `REPLAY_PRINT_BOOK`, `REPLAY_DEPTH_LEVELS` and `DEBUG` are read; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let depth_levels = match lookup("REPLAY_DEPTH_LEVELS") {
            Some(value) => value.parse().map_err(|_| {
                Error::ConfigurationError(format!("REPLAY_DEPTH_LEVELS is not a count: {}", value))
            })?,
            None => defaults.depth_levels,
        };

        Ok(Self {
            print_book: lookup("REPLAY_PRINT_BOOK").map_or(defaults.print_book, |v| flag(&v)),
            depth_levels,
            debug: lookup("DEBUG").map_or(defaults.debug, |v| flag(&v)),
        })
    }
}
