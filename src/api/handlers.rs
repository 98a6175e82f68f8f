//! API Handlers
//!
//! HTTP request handlers for each key-value endpoint. Handlers only talk
//! to the coordinator; cache and backing store stay behind it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::coordinator::CacheCoordinator;
use crate::error::{KvError, Result};
use crate::models::{DeleteResponse, GetResponse, HealthResponse, PutResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Coordinator owning the cache, the backing store and the counters
    pub coordinator: Arc<CacheCoordinator>,
}

impl AppState {
    /// Creates a new AppState around the given coordinator.
    pub fn new(coordinator: CacheCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }
}

/// Handler for PUT /kv/:key
///
/// Stores the raw request body as the value for `key`, writing through to
/// the backing store.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: String,
) -> Result<Json<PutResponse>> {
    state.coordinator.write(&key, body).await?;
    Ok(Json(PutResponse::new(key)))
}

/// Handler for GET /kv/:key
///
/// Serves from the cache when possible, falling back to the backing store.
/// A key that exists nowhere maps to 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.coordinator.read(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(KvError::NotFound(key)),
    }
}

/// Handler for DELETE /kv/:key
///
/// Removes the key from the backing store and the cache. Deleting an
/// absent key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.coordinator.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns the hit/miss counters and the derived hit rate.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.coordinator.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
