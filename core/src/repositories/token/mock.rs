//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::TokenRepository;

/// Mock denylist with lazy expiry
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live denylist entries
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.revoked
            .read()
            .await
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn blacklist_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut revoked = self.revoked.write().await;
        let now = Utc::now();
        revoked.retain(|_, expiry| *expiry > now);
        if expires_at > now {
            revoked.insert(jti.to_string(), expires_at);
        }
        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, DomainError> {
        let revoked = self.revoked.read().await;
        Ok(revoked
            .get(jti)
            .map(|expires_at| *expires_at > Utc::now())
            .unwrap_or(false))
    }
}
