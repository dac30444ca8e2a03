//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_auth_error_messages() {
    assert_eq!(AuthError::DuplicateEmail.to_string(), "Email already registered");
    assert_eq!(AuthError::DuplicatePhone.to_string(), "Phone number already registered");
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password");
    assert_eq!(
        AuthError::VerificationRequired.to_string(),
        "Email and phone verification required"
    );
}

#[test]
fn test_bridged_errors_are_transparent() {
    let error: DomainError = TokenError::WrongTokenType.into();
    assert_eq!(error.to_string(), "Invalid token type");

    let error: DomainError = ValidationError::DuplicateValue { field: "email".to_string() }.into();
    assert_eq!(error.to_string(), "email already exists");
}

#[test]
fn test_status_codes() {
    assert_eq!(DomainError::from(AuthError::DuplicateEmail).status_code(), 400);
    assert_eq!(DomainError::from(AuthError::InvalidCredentials).status_code(), 401);
    assert_eq!(DomainError::from(AuthError::UserNotFound).status_code(), 401);
    assert_eq!(DomainError::from(AuthError::MissingRefreshToken).status_code(), 400);
    assert_eq!(
        DomainError::from(AuthError::WeakPassword { reason: "short".to_string() }).status_code(),
        400
    );
    assert_eq!(DomainError::from(TokenError::TokenExpired).status_code(), 401);
    assert_eq!(DomainError::from(TokenError::TokenGenerationFailed).status_code(), 500);
    assert_eq!(DomainError::from(ValidationError::InvalidId).status_code(), 400);
    assert_eq!(DomainError::NotFound { resource: "User".to_string() }.status_code(), 404);
    assert_eq!(DomainError::internal("db down").status_code(), 500);
}

#[test]
fn test_error_codes() {
    assert_eq!(DomainError::from(TokenError::TokenExpired).error_code(), "TOKEN_EXPIRED");
    assert_eq!(DomainError::from(AuthError::DuplicatePhone).error_code(), "DUPLICATE_PHONE");
    assert_eq!(DomainError::internal("x").error_code(), "INTERNAL_ERROR");
}

#[test]
fn test_internal_classification() {
    assert!(DomainError::internal("boom").is_internal());
    assert!(DomainError::from(TokenError::TokenGenerationFailed).is_internal());
    assert!(!DomainError::from(AuthError::InvalidCredentials).is_internal());
}
