//! Cache Store Module
//!
//! Thread-safe bounded cache shared by all request handlers. One mutex
//! guards the index map and the recency list jointly, so a half-updated
//! cache is never observable from another thread. The lock is held only
//! for the in-memory mutation; backing store I/O happens outside it.

use std::sync::Mutex;

use crate::cache::LruList;

// == Cache Store ==
/// Bounded LRU cache over opaque string keys and values.
///
/// Knows nothing about persistence; eviction and recency are its only
/// concerns. Capacity is fixed at construction.
#[derive(Debug)]
pub struct CacheStore {
    inner: Mutex<LruList>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a cache bounded at `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruList::new(capacity)),
        }
    }

    // == Get ==
    /// Returns the value for `key`, refreshing its recency on a hit.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).map(str::to_string)
    }

    // == Put ==
    /// Stores `key = value`, evicting the least recently used entry when a
    /// new insert would exceed capacity. Returns the evicted key, if any.
    pub fn put(&self, key: &str, value: String) -> Option<String> {
        self.lock().put(key, value)
    }

    // == Remove ==
    /// Removes `key` if present; no-op otherwise.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    // == Length ==
    /// Returns the current number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruList> {
        // A poisoned lock means a panic mid-mutation; nothing to recover.
        self.inner.lock().expect("cache lock poisoned")
    }
}
