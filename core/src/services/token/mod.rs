//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token issuance with distinct signing secrets
//! - Verification with typed failures (invalid, expired, wrong type)
//! - Access token revocation through the denylist

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
