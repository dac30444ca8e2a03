use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str, phone: &str) -> User {
    User::new(
        "Ann".to_string(),
        email.to_string(),
        phone.to_string(),
        "hash".to_string(),
    )
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("a@x.com", "+1555")).await.unwrap();

    let by_email = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(by_email.id, created.id);
    assert_eq!(by_id.email, "a@x.com");
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_constraints() {
    let repo = MockUserRepository::new();
    repo.create(user("a@x.com", "+1555")).await.unwrap();

    let err = repo.create(user("a@x.com", "+1999")).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::DuplicateEmail));

    let err = repo.create(user("b@x.com", "+1555")).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::DuplicatePhone));
}

#[tokio::test]
async fn test_find_by_email_or_phone() {
    let repo = MockUserRepository::new();
    repo.create(user("a@x.com", "+1555")).await.unwrap();

    assert!(repo.find_by_email_or_phone("a@x.com", "+0").await.unwrap().is_some());
    assert!(repo.find_by_email_or_phone("z@x.com", "+1555").await.unwrap().is_some());
    assert!(repo.find_by_email_or_phone("z@x.com", "+0").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_email_or_phone_prefers_email_holder() {
    let repo = MockUserRepository::new();
    let ann = repo.create(user("a@x.com", "+1555")).await.unwrap();
    repo.create(user("b@x.com", "+1999")).await.unwrap();

    for _ in 0..20 {
        let found = repo.find_by_email_or_phone("a@x.com", "+1999").await.unwrap().unwrap();
        assert_eq!(found.id, ann.id);
    }
}

#[tokio::test]
async fn test_update_missing_user() {
    let repo = MockUserRepository::new();
    let err = repo.update(user("a@x.com", "+1555")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_call_counter() {
    let repo = MockUserRepository::new();
    assert_eq!(repo.call_count(), 0);
    repo.find_by_email("a@x.com").await.unwrap();
    repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert_eq!(repo.call_count(), 2);
}
