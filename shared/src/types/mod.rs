//! Type definitions shared by the HTTP layer and its tests
//!
//! - `response` - API response envelope and health checks

pub mod response;

pub use response::{ApiResponse, FieldError, HealthResponse, HealthStatus, ServiceHealth};
