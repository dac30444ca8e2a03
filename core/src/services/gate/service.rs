//! Request gate implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

/// A verified caller: the loaded user and the access token claims
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    /// User record with the password hash cleared
    pub user: User,
    pub claims: Claims,
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer_token(authorization: Option<&str>) -> DomainResult<&str> {
    authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::MissingToken.into())
}

/// Authenticates inbound requests
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify an access token and load its subject
    async fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedSubject>;

    /// Mandatory mode: every failure is reported
    async fn require(&self, authorization: Option<&str>) -> DomainResult<AuthenticatedSubject> {
        let token = extract_bearer_token(authorization)?;
        self.authenticate(token).await
    }

    /// Optional mode: any failure yields no subject
    async fn optional(&self, authorization: Option<&str>) -> Option<AuthenticatedSubject> {
        match self.require(authorization).await {
            Ok(subject) => Some(subject),
            Err(e) => {
                if authorization.is_some() {
                    tracing::debug!(error = %e, "Optional authentication skipped");
                }
                None
            }
        }
    }
}

/// Gate backed by the token service and the user repository
pub struct RequestGate<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService<T>>,
}

impl<U, T> RequestGate<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<T>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }
}

#[async_trait]
impl<U, T> Authenticator for RequestGate<U, T>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    async fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedSubject> {
        let claims = self.token_service.verify_access_token(token).await?;

        let mut user = self
            .user_repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_fully_verified() {
            return Err(DomainError::Auth(AuthError::VerificationRequired));
        }

        user.password_hash.clear();
        Ok(AuthenticatedSubject { user, claims })
    }
}
