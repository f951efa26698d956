//! Cache Store Module
//!
//! Main cache engine combining a key index with the LRU recency list and
//! byte-size capacity enforcement.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::cache::entry::Entry;
use crate::cache::lru::RecencyList;
use crate::cache::{CacheStats, Value};
use crate::config::Config;

/// Hook invoked with each evicted key and value.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

// == Cache ==
/// Size-bounded LRU cache.
///
/// Every live entry costs `key.len() + value.size()` units. When a ceiling is
/// configured, [`Cache::add`] evicts least recently used entries until the
/// total fits again, which may include the entry it just inserted.
///
/// The cache is not synchronized; wrap it in a `Mutex` to share it.
pub struct Cache<V: Value> {
    /// Size ceiling, 0 = unbounded
    max_bytes: usize,
    /// Sum of entry sizes over all live entries
    used_bytes: usize,
    /// Recency order, front = most recently used
    order: RecencyList<V>,
    /// Key to recency list handle
    index: HashMap<String, usize>,
    /// Called after each eviction completes
    on_evicted: Option<EvictionCallback<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Value> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache without an eviction callback.
    ///
    /// # Arguments
    /// * `max_bytes` - Size ceiling; 0 disables size-based eviction
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            order: RecencyList::new(),
            index: HashMap::new(),
            on_evicted: None,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty cache that reports every eviction to `on_evicted`.
    ///
    /// The callback runs synchronously on the calling thread, after the
    /// entry has left the cache and the byte total has been decremented.
    ///
    /// The callback must be `Send` so the cache itself stays `Send` and can be
    /// moved into a thread or a `Mutex`. Callbacks capturing `Rc`/`RefCell`
    /// state are rejected; use `Arc<Mutex<_>>` for shared state instead.
    pub fn with_eviction_callback<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(&str, &V) + Send + 'static,
    {
        let mut cache = Self::new(max_bytes);
        cache.on_evicted = Some(Box::new(on_evicted));
        cache
    }

    /// Creates an empty cache sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_bytes)
    }

    // == Get ==
    /// Looks up `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let Some(&handle) = self.index.get(key) else {
            self.stats.record_miss();
            trace!(key, "cache miss");
            return None;
        };

        self.order.move_to_front(handle);
        self.stats.record_hit();
        trace!(key, "cache hit");
        self.order.get(handle).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Looks up `key` without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.order.get(handle).map(|entry| &entry.value)
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Add ==
    /// Inserts or replaces the value for `key` and marks it most recently used.
    ///
    /// Replacing an existing value adjusts the byte total by the value size
    /// delta only. Afterwards, if a ceiling is set, least recently used
    /// entries are evicted until the total is back under it.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&handle) = self.index.get(&key) {
            self.order.move_to_front(handle);
            if let Some(entry) = self.order.get_mut(handle) {
                let new_size = value.size();
                let old_size = std::mem::replace(&mut entry.value, value).size();
                self.used_bytes = self
                    .used_bytes
                    .saturating_sub(old_size)
                    .saturating_add(new_size);
                trace!(key = %key, old_size, new_size, "updated entry");
            }
        } else {
            let entry = Entry::new(key.clone(), value);
            let size = entry.size();
            if self.max_bytes != 0 && size > self.max_bytes {
                debug!(
                    key = %key,
                    size,
                    max_bytes = self.max_bytes,
                    "entry exceeds cache ceiling on its own"
                );
            }
            self.used_bytes = self.used_bytes.saturating_add(size);
            let handle = self.order.push_front(entry);
            self.index.insert(key, handle);
            trace!(size, used_bytes = self.used_bytes, "inserted entry");
        }

        self.enforce_ceiling();
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry.
    ///
    /// The eviction callback, if any, sees the entry once it is no longer
    /// reachable. The owned pair is then handed back to the caller.
    /// Returns None and does nothing if the cache is empty.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        let size = entry.size();
        self.used_bytes = self.used_bytes.saturating_sub(size);
        self.stats.record_eviction();

        debug!(
            key = %entry.key,
            size,
            used_bytes = self.used_bytes,
            max_bytes = self.max_bytes,
            "evicted entry"
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&entry.key, &entry.value);
        }

        Some(entry.into_parts())
    }

    // == Remove ==
    /// Deletes `key` and returns its value.
    ///
    /// This is not an eviction: the callback does not run and the eviction
    /// counter is unchanged.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let handle = self.index.remove(key)?;
        let entry = self.order.remove(handle)?;
        self.used_bytes = self.used_bytes.saturating_sub(entry.size());
        trace!(key, used_bytes = self.used_bytes, "removed entry");
        Some(entry.value)
    }

    // == Keys ==
    /// Iterates live keys from most to least recently used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.order.iter().map(|entry| entry.key.as_str())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .clone()
            .with_occupancy(self.len(), self.used_bytes, self.max_bytes)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the size units held by live entries.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Returns the configured ceiling, 0 = unbounded.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn enforce_ceiling(&mut self) {
        if self.max_bytes == 0 {
            return;
        }
        while self.used_bytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }
}

impl<V: Value> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.len())
            .field("has_eviction_callback", &self.on_evicted.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
