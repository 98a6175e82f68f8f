//! API Module
//!
//! HTTP handlers and routing for the key-value service REST API.
//!
//! # Endpoints
//! - `PUT /kv/:key` - Store the request body as the value for a key
//! - `GET /kv/:key` - Retrieve a value by key
//! - `DELETE /kv/:key` - Delete a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
