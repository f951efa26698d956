//! Byte LRU - A bounded-memory, in-process cache
//!
//! Provides an LRU cache whose capacity is measured in abstract size units
//! (keys by byte length, values through the [`Value`] trait), with an optional
//! callback fired for every evicted entry.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, Value};
pub use config::Config;
pub use error::{CacheError, Result};
