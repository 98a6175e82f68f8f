//! Cache Coordinator Module
//!
//! Orchestrates read-through, write-through and delete propagation between
//! the in-memory cache and the durable backing store. Handlers talk to the
//! coordinator only; neither store is touched directly.
//!
//! Ordering rules:
//! - Reads consult the cache first; only a miss goes to the backing store,
//!   and a found value is filled into the cache before returning.
//! - Writes and deletes go to the backing store first and touch the cache
//!   only after the store call succeeds, so the cache never holds a value
//!   that was not durably committed.
//!
//! The two steps of a write are not atomic. When two callers write the same
//! key concurrently, the store commit order and the cache update order can
//! interleave, so the cached value may briefly trail the last durable
//! commit until the next overwrite, eviction or delete. Closing that window
//! would need a per-key lock spanning both stores; this layer accepts the
//! limitation instead of serializing unrelated I/O.

use std::sync::Arc;

use tracing::debug;

use crate::backing::BackingStore;
use crate::cache::{CacheMetrics, CacheStore, StatsSnapshot, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{KvError, Result};

// == Cache Coordinator ==
/// Single entry point for key-value operations.
pub struct CacheCoordinator {
    cache: CacheStore,
    store: Arc<dyn BackingStore>,
    metrics: CacheMetrics,
}

impl CacheCoordinator {
    // == Constructor ==
    /// Creates a coordinator over the given cache and backing store.
    pub fn new(cache: CacheStore, store: Arc<dyn BackingStore>) -> Self {
        Self {
            cache,
            store,
            metrics: CacheMetrics::new(),
        }
    }

    // == Read ==
    /// Looks up `key`, serving from the cache when possible.
    ///
    /// A cache hit returns without any backing store access. On a miss the
    /// backing store is queried; a found value populates the cache before
    /// returning. `Ok(None)` is the normal negative result for a key that
    /// exists nowhere; store failures surface as errors.
    pub async fn read(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.cache.get(key) {
            self.metrics.record_hit();
            return Ok(Some(value));
        }

        self.metrics.record_miss();

        match self.store.get(key).await? {
            Some(value) => {
                debug!(key, "read-through fill");
                if let Some(evicted) = self.cache.put(key, value.clone()) {
                    debug!(key = %evicted, "evicted least recently used entry");
                }
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Write ==
    /// Persists `key = value` to the backing store, then updates the cache.
    ///
    /// If the store write fails the cache is left untouched and the error
    /// is returned, so readers can never observe a value that is not
    /// durable.
    pub async fn write(&self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        validate_value(&value)?;

        self.store.put(key, &value).await?;

        if let Some(evicted) = self.cache.put(key, value) {
            debug!(key = %evicted, "evicted least recently used entry");
        }
        Ok(())
    }

    // == Delete ==
    /// Removes `key` from the backing store, then from the cache.
    ///
    /// Store first, mirroring the write ordering, so the cache cannot keep
    /// serving a value already deleted from durable storage. Deleting an
    /// absent key succeeds.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key).await?;
        self.cache.remove(key);
        Ok(())
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.metrics.snapshot()
    }

    // == Cached Entries ==
    /// Returns the current number of cached entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

/// Rejects empty or oversized keys before any store access.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidRequest("key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(KvError::InvalidRequest(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Rejects oversized values before any store access.
fn validate_value(value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(KvError::InvalidRequest(format!(
            "value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    Ok(())
}
