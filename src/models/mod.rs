//! Response models for the key-value service API
//!
//! Requests carry the key in the path and the raw value in the body, so
//! only response DTOs are defined here.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, PutResponse, StatsResponse,
};
