//! Configuration Module
//!
//! Handles loading the cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Environment variable holding the size ceiling.
pub const MAX_BYTES_VAR: &str = "LRU_MAX_BYTES";

/// Cache configuration parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Size ceiling in abstract units, 0 = unbounded
    pub max_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_MAX_BYTES` - Size ceiling (default: 0, unbounded). Values `<= 0`
    ///   disable size-based eviction.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_bytes = match lookup(MAX_BYTES_VAR) {
            None => 0,
            Some(raw) => parse_max_bytes(&raw).ok_or_else(|| CacheError::InvalidConfig {
                var: MAX_BYTES_VAR.to_string(),
                value: raw.clone(),
            })?,
        };

        Ok(Self { max_bytes })
    }
}

fn parse_max_bytes(raw: &str) -> Option<usize> {
    let parsed: i128 = raw.trim().parse().ok()?;
    if parsed <= 0 {
        return Some(0);
    }
    usize::try_from(parsed).ok()
}
