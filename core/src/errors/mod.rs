//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Internal { .. } => 500,
            DomainError::Auth(error) => match error {
                AuthError::DuplicateEmail
                | AuthError::DuplicatePhone
                | AuthError::InvalidCurrentPassword
                | AuthError::WeakPassword { .. }
                | AuthError::MissingRefreshToken => 400,
                AuthError::InvalidCredentials
                | AuthError::UserNotFound
                | AuthError::VerificationRequired
                | AuthError::MissingToken
                | AuthError::AuthenticationRequired => 401,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => 500,
            DomainError::Token(_) => 401,
            DomainError::ValidationErr(_) => 400,
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(error) => match error {
                AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
                AuthError::DuplicatePhone => "DUPLICATE_PHONE",
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::UserNotFound => "USER_NOT_FOUND",
                AuthError::VerificationRequired => "VERIFICATION_REQUIRED",
                AuthError::InvalidCurrentPassword => "INVALID_CURRENT_PASSWORD",
                AuthError::WeakPassword { .. } => "WEAK_PASSWORD",
                AuthError::MissingToken => "MISSING_TOKEN",
                AuthError::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
                AuthError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            },
            DomainError::Token(error) => match error {
                TokenError::InvalidToken => "INVALID_TOKEN",
                TokenError::TokenExpired => "TOKEN_EXPIRED",
                TokenError::WrongTokenType => "WRONG_TOKEN_TYPE",
                TokenError::TokenRevoked => "TOKEN_REVOKED",
                TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            },
            DomainError::ValidationErr(error) => match error {
                ValidationError::InvalidField { .. } => "VALIDATION_ERROR",
                ValidationError::InvalidId => "INVALID_ID",
                ValidationError::DuplicateValue { .. } => "DUPLICATE_VALUE",
            },
        }
    }

    /// Server-side failure that must not leak its message outside development
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests;
