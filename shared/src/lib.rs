//! Shared utilities and common types for the Bomato server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope
//! - Input validation helpers (email, phone, URL, password policy)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, PasswordConfig,
    RateLimitConfig, ServerConfig,
};
pub use types::{ApiResponse, FieldError, HealthResponse};
pub use utils::validation;
