//! Backing Store Module
//!
//! Durable key-value persistence behind the cache. The coordinator only
//! sees the `BackingStore` trait, so the core logic runs unchanged against
//! PostgreSQL in production and an in-memory fake in tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::error::Result;

// == Backing Store Trait ==
/// Durable, authoritative key-value persistence.
///
/// Calls may block on network or disk I/O and may fail transiently; the
/// cache layer treats this as an opaque, possibly slow, possibly failing
/// dependency and never invokes it while holding the cache lock.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    /// Idempotent schema/setup step, run once before serving traffic.
    async fn initialize(&self) -> Result<()>;

    /// Fetches the value for `key`; `Ok(None)` means the key does not
    /// exist, distinct from a store failure.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Upserts `key = value`: insert if absent, overwrite if present.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
