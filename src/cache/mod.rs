//! Cache Module
//!
//! Provides a size-bounded in-memory cache with LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;
mod value;


// Re-export public types
pub use stats::CacheStats;
pub use store::{Cache, EvictionCallback};
pub use value::Value;
