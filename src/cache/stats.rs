//! Cache Statistics Module
//!
//! Counters for lookups and evictions plus occupancy gauges.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of cache activity and occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls that did not
    pub misses: u64,
    /// Entries removed by the size ceiling or `remove_oldest`
    pub evictions: u64,
    /// Live entries
    pub total_entries: usize,
    /// Size units currently held by live entries
    pub used_bytes: usize,
    /// Configured ceiling, 0 = unbounded
    pub max_bytes: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    // == Fill Ratio ==
    /// Returns used_bytes / max_bytes, or None for an unbounded cache.
    pub fn fill_ratio(&self) -> Option<f64> {
        (self.max_bytes != 0).then(|| self.used_bytes as f64 / self.max_bytes as f64)
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Fills in the occupancy gauges on a copy of the counters.
    pub(crate) fn with_occupancy(
        mut self,
        total_entries: usize,
        used_bytes: usize,
        max_bytes: usize,
    ) -> Self {
        self.total_entries = total_entries;
        self.used_bytes = used_bytes;
        self.max_bytes = max_bytes;
        self
    }
}
