use chrono::{Duration, Utc};

use crate::repositories::token::{MockTokenRepository, TokenRepository};

#[tokio::test]
async fn test_blacklist_roundtrip() {
    let repo = MockTokenRepository::new();
    assert!(!repo.is_token_blacklisted("jti-1").await.unwrap());

    repo.blacklist_token("jti-1", Utc::now() + Duration::minutes(15))
        .await
        .unwrap();

    assert!(repo.is_token_blacklisted("jti-1").await.unwrap());
    assert!(!repo.is_token_blacklisted("jti-2").await.unwrap());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_expired_entries_are_not_kept() {
    let repo = MockTokenRepository::new();
    repo.blacklist_token("old", Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    assert!(!repo.is_token_blacklisted("old").await.unwrap());
    assert_eq!(repo.len().await, 0);
}
