//! Authentication service module
//!
//! This module provides the account lifecycle:
//! - Registration with duplicate email/phone detection
//! - Login with enumeration-resistant failures
//! - Rolling token refresh gated on verification
//! - Password change and profile update
//! - Logout through the access token denylist

mod config;
mod persistence;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use persistence::prepare_user_for_save;
pub use service::{AuthService, Registration};
