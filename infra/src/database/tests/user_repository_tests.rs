use bomato_core::errors::{AuthError, DomainError, ValidationError};

use crate::database::mysql::user_repository_impl::duplicate_key_error;

#[test]
fn test_duplicate_email_key_maps_to_duplicate_email() {
    let error = duplicate_key_error("Duplicate entry 'a@b.co' for key 'users.uk_users_email'");
    assert!(matches!(error, DomainError::Auth(AuthError::DuplicateEmail)));
    assert_eq!(error.status_code(), 400);
}

#[test]
fn test_duplicate_phone_key_maps_to_duplicate_phone() {
    let error = duplicate_key_error("Duplicate entry '+15550100' for key 'uk_users_phone'");
    assert!(matches!(error, DomainError::Auth(AuthError::DuplicatePhone)));
}

#[test]
fn test_email_looking_value_does_not_confuse_key_detection() {
    // The duplicated value itself mentions the email key name
    let error = duplicate_key_error("Duplicate entry 'uk_users_email' for key 'users.uk_users_phone'");
    assert!(matches!(error, DomainError::Auth(AuthError::DuplicatePhone)));
}

#[test]
fn test_unknown_key_maps_to_duplicate_value() {
    let error = duplicate_key_error("Duplicate entry 'x' for key 'PRIMARY'");
    assert!(matches!(
        error,
        DomainError::ValidationErr(ValidationError::DuplicateValue { .. })
    ));
}
