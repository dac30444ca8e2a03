//! Unit tests for token service

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::token::{Claims, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(MockTokenRepository::new(), TokenServiceConfig::default())
}

fn user() -> User {
    User::new(
        "Ann".to_string(),
        "a@x.com".to_string(),
        "+15551234567".to_string(),
        "hash".to_string(),
    )
}

fn expired_claims(service: &TokenService<MockTokenRepository>, user: &User, token_type: TokenType) -> Claims {
    let mut claims = service.claims_for(user, token_type);
    claims.iat = (Utc::now() - Duration::hours(2)).timestamp();
    claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
    claims
}

#[test]
fn test_access_token_roundtrip() {
    let service = service();
    let user = user();
    let token = service.issue_access_token(&user).unwrap();

    let claims = service.verify(&token, TokenType::Access).unwrap();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.iss, "bomato");
    assert_eq!(claims.aud, "bomato-users");
    assert_eq!(claims.exp - claims.iat, 15 * 60);
}

#[test]
fn test_refresh_token_roundtrip() {
    let service = service();
    let user = user();
    let token = service.issue_refresh_token(&user).unwrap();

    let claims = service.verify_refresh_token(&token).unwrap();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.token_type, TokenType::Refresh);
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let service = service();
    let token = service.issue_access_token(&user()).unwrap();

    let err = service.verify(&token, TokenType::Refresh).unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::WrongTokenType));
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let service = service();
    let token = service.issue_refresh_token(&user()).unwrap();

    let err = service.verify(&token, TokenType::Access).unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::WrongTokenType));
}

#[test]
fn test_mismatched_type_tag_under_right_secret() {
    let service = service();
    let mut claims = service.claims_for(&user(), TokenType::Access);
    let token = service.encode_claims(&claims).unwrap();
    claims.token_type = TokenType::Refresh;
    assert!(service.verify(&token, TokenType::Access).is_ok());

    // Refresh-tagged claims signed with the access secret
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(
            TokenServiceConfig::default().access_secret.as_bytes(),
        ),
    )
    .unwrap();
    let err = service.verify(&forged, TokenType::Access).unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::WrongTokenType));
}

#[test]
fn test_expired_token_reports_expired() {
    let service = service();
    let user = user();
    let token = service
        .encode_claims(&expired_claims(&service, &user, TokenType::Access))
        .unwrap();

    let err = service.verify(&token, TokenType::Access).unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::TokenExpired));
}

#[test]
fn test_expired_refresh_token_reports_expired() {
    let service = service();
    let user = user();
    let token = service
        .encode_claims(&expired_claims(&service, &user, TokenType::Refresh))
        .unwrap();

    let err = service.verify_refresh_token(&token).unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::TokenExpired));
}

#[test]
fn test_garbage_and_foreign_tokens_are_invalid() {
    let service = service();
    assert_eq!(
        service.verify("not.a.jwt", TokenType::Access).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );

    let other = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_secret: "someone-else-access".to_string(),
            refresh_secret: "someone-else-refresh".to_string(),
            ..Default::default()
        },
    );
    let foreign = other.issue_access_token(&user()).unwrap();
    assert_eq!(
        service.verify(&foreign, TokenType::Access).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_wrong_audience_is_invalid() {
    let service = service();
    let mut claims = service.claims_for(&user(), TokenType::Access);
    claims.aud = "someone-else".to_string();
    let token = service.encode_claims(&claims).unwrap();

    assert_eq!(
        service.verify(&token, TokenType::Access).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_tokens_are_unique_per_issue() {
    let service = service();
    let user = user();
    let pair = service.generate_tokens(&user).unwrap();
    let again = service.generate_tokens(&user).unwrap();

    assert_ne!(pair.access_token, again.access_token);
    assert_ne!(pair.refresh_token, again.refresh_token);
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[tokio::test]
async fn test_revoked_access_token_rejected() {
    let service = service();
    let token = service.issue_access_token(&user()).unwrap();
    let claims = service.verify_access_token(&token).await.unwrap();

    service.revoke(&claims).await.unwrap();

    let err = service.verify_access_token(&token).await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::TokenRevoked));
}

struct FailingDenylist;

#[async_trait]
impl TokenRepository for FailingDenylist {
    async fn blacklist_token(&self, _jti: &str, _expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        Err(DomainError::internal("cache unavailable"))
    }

    async fn is_token_blacklisted(&self, _jti: &str) -> Result<bool, DomainError> {
        Err(DomainError::internal("cache unavailable"))
    }
}

#[tokio::test]
async fn test_denylist_outage_fails_open() {
    let service = TokenService::new(FailingDenylist, TokenServiceConfig::default());
    let token = service.issue_access_token(&user()).unwrap();

    assert!(service.verify_access_token(&token).await.is_ok());
    assert!(service
        .revoke(&service.verify(&token, TokenType::Access).unwrap())
        .await
        .is_err());
}
