//! Cache Statistics Module
//!
//! Process-wide hit/miss counters. The counters are plain atomics bumped
//! without coordinating with the cache mutation itself, so a snapshot is an
//! approximate measure of traffic, never an input to correctness decisions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Metrics ==
/// Shared hit/miss counters, initialized once at service start.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates metrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads both counters and derives the hit rate.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Number of reads served from the cache
    pub hits: u64,
    /// Number of reads that had to consult the backing store
    pub misses: u64,
    /// Percentage of reads served from the cache (0 when no reads yet)
    pub hit_rate: f64,
}

impl StatsSnapshot {
    /// Builds a snapshot, computing `hit_rate = 100 * hits / (hits + misses)`.
    pub fn new(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            hit_rate,
        }
    }
}
