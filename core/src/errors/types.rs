//! Domain-specific error types for authentication and related operations
//!
//! Display strings are the client-facing messages rendered by the HTTP layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Phone number already registered")]
    DuplicatePhone,

    /// Shared by unknown email and wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Email and phone verification required")]
    VerificationRequired,

    #[error("Current password is incorrect")]
    InvalidCurrentPassword,

    #[error("{reason}")]
    WeakPassword { reason: String },

    #[error("Access token is required")]
    MissingToken,

    #[error("Refresh token is required")]
    MissingRefreshToken,

    #[error("Authentication required")]
    AuthenticationRequired,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token type")]
    WrongTokenType,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid ID format")]
    InvalidId,

    #[error("{field} already exists")]
    DuplicateValue { field: String },
}

impl ValidationError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
