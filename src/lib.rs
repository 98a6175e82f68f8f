//! Cachefront - a cache-aside key-value service
//!
//! A bounded in-memory LRU cache fronting a durable PostgreSQL backing
//! store, exposed over a small HTTP API.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use coordinator::CacheCoordinator;
