//! Integration Tests for the Cache
//!
//! Exercises the public API end to end: lookups, updates, byte-based
//! eviction, the eviction callback, statistics and configuration.

use byte_lru::{Cache, CacheError, Config, Value};
use std::sync::{Arc, Mutex, Once};
use std::thread;

// == Helper Functions ==

static TRACING: Once = Once::new();

/// Routes cache logs to the test output; `RUST_LOG=byte_lru=debug` shows evictions.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "byte_lru=warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A payload that only reports a size.
#[derive(Debug, Clone, PartialEq)]
struct Blob(usize);

impl Value for Blob {
    fn size(&self) -> usize {
        self.0
    }
}

fn eviction_log<V: Value + 'static>(max_bytes: usize) -> (Cache<V>, Arc<Mutex<Vec<String>>>) {
    let keys = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&keys);
    let cache = Cache::with_eviction_callback(max_bytes, move |key: &str, _: &V| {
        sink.lock().unwrap().push(key.to_string());
    });
    (cache, keys)
}

// == Lookup Tests ==

#[test]
fn test_unbounded_get_hit_and_miss() {
    init_tracing();
    let mut cache = Cache::new(0);

    cache.add("key1", "1234".to_string());

    assert_eq!(cache.get("key1").map(String::as_str), Some("1234"));
    assert!(cache.get("key2").is_none());
}

#[test]
fn test_readd_moves_key_to_front() {
    init_tracing();
    let mut cache = Cache::new(8);

    cache.add("k1", "v1".to_string());
    cache.add("k2", "v2".to_string());
    cache.add("k2", "v2".to_string());

    assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["k2", "k1"]);
    assert_eq!(cache.len(), 2);
}

// == Eviction Tests ==

#[test]
fn test_capacity_for_two_of_three_evicts_first() {
    init_tracing();
    let (k1, k2, k3) = ("key1", "key2", "key3");
    let (v1, v2, v3) = ("value1", "value2", "value3");
    let mut cache = Cache::new(k1.len() + k2.len() + v1.len() + v2.len());

    cache.add(k1, v1);
    cache.add(k2, v2);
    cache.add(k3, v3);

    assert!(cache.get("key1").is_none());
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_callback_records_eviction_order() {
    init_tracing();
    let (mut cache, evicted) = eviction_log::<String>(10);

    cache.add("key1", "123456".to_string());
    cache.add("k2", "k2".to_string());
    cache.add("k3", "k3".to_string());
    cache.add("k4", "k4".to_string());

    assert_eq!(*evicted.lock().unwrap(), vec!["key1", "k2"]);
    assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["k4", "k3"]);
}

#[test]
fn test_single_oversized_value_leaves_cache_empty() {
    init_tracing();
    let (mut cache, evicted) = eviction_log::<Blob>(16);

    cache.add("huge", Blob(100));

    assert!(cache.is_empty());
    assert_eq!(cache.used_bytes(), 0);
    assert_eq!(*evicted.lock().unwrap(), vec!["huge"]);
}

#[test]
fn test_max_size_values_do_not_overflow_accounting() {
    init_tracing();
    let (mut bounded, evicted) = eviction_log::<Blob>(10);
    bounded.add("a", Blob(usize::MAX));

    assert!(bounded.is_empty());
    assert_eq!(bounded.used_bytes(), 0);
    assert_eq!(*evicted.lock().unwrap(), vec!["a"]);

    let mut unbounded = Cache::new(0);
    unbounded.add("a", Blob(usize::MAX / 2 + 1));
    unbounded.add("b", Blob(usize::MAX / 2 + 1));

    assert_eq!(unbounded.len(), 2);
    assert_eq!(unbounded.used_bytes(), usize::MAX);
}

#[test]
fn test_callback_sees_value_after_removal() {
    init_tracing();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut cache = Cache::with_eviction_callback(12, move |key: &str, value: &Blob| {
        sink.lock().unwrap().push((key.to_string(), value.clone()));
    });

    cache.add("a", Blob(5));
    cache.add("b", Blob(5));
    cache.get("a");
    cache.add("c", Blob(5));

    assert_eq!(*seen.lock().unwrap(), vec![("b".to_string(), Blob(5))]);
    assert!(cache.get("b").is_none());
    assert_eq!(cache.used_bytes(), 12);
}

#[test]
fn test_manual_remove_oldest_drains_in_lru_order() {
    init_tracing();
    let (mut cache, evicted) = eviction_log::<Vec<u8>>(0);

    cache.add("a", vec![0; 3]);
    cache.add("b", vec![0; 3]);
    cache.add("c", vec![0; 3]);
    cache.get("a");

    while cache.remove_oldest().is_some() {}

    assert_eq!(*evicted.lock().unwrap(), vec!["b", "c", "a"]);
    assert_eq!(cache.used_bytes(), 0);
    assert!(cache.remove_oldest().is_none());
}

// == Statistics Tests ==

#[test]
fn test_stats_serialize() {
    init_tracing();
    let mut cache = Cache::new(10);

    cache.add("key1", "123456".to_string());
    cache.get("key1");
    cache.get("missing");
    cache.add("k2", "k2".to_string());

    let json = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["used_bytes"], 4);
    assert_eq!(json["max_bytes"], 10);
}

// == Concurrency Tests ==

#[test]
fn test_cache_behind_mutex_across_threads() {
    init_tracing();
    let cache = Arc::new(Mutex::new(Cache::<String>::new(0)));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..25 {
                    cache.lock().unwrap().add(format!("t{t}-{i}"), "v".to_string());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.lock().unwrap().len(), 100);
}

// == Configuration Tests ==

#[test]
fn test_config_from_env_builds_cache() {
    init_tracing();
    std::env::set_var("LRU_MAX_BYTES", "12");
    let config = Config::from_env().unwrap();
    std::env::set_var("LRU_MAX_BYTES", "not-a-number");
    let invalid = Config::from_env();
    std::env::remove_var("LRU_MAX_BYTES");

    let mut cache = Cache::from_config(&config);
    cache.add("a", "12345".to_string());
    cache.add("b", "12345".to_string());
    cache.add("c", "12345".to_string());

    assert_eq!(cache.max_bytes(), 12);
    assert_eq!(cache.len(), 2);
    assert!(matches!(invalid, Err(CacheError::InvalidConfig { .. })));
}
