//! Redis-backed denylist of revoked access tokens

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bomato_core::errors::DomainResult;
use bomato_core::repositories::TokenRepository;

use super::RedisClient;

/// Stores `bomato:denylist:<jti>` markers that expire together with the token
#[derive(Clone)]
pub struct RedisTokenRepository {
    client: RedisClient,
}

impl RedisTokenRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, jti: &str) -> String {
        self.client.key(&["denylist", jti])
    }
}

/// Seconds a denylist entry must live; `None` once the token has expired
pub(crate) fn remaining_ttl(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let seconds = (expires_at - now).num_seconds();
    (seconds > 0).then_some(seconds as u64)
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn blacklist_token(&self, jti: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        let Some(ttl) = remaining_ttl(expires_at, Utc::now()) else {
            tracing::debug!(jti = %jti, "Token already expired, skipping denylist entry");
            return Ok(());
        };

        self.client.set_with_expiry(&self.key(jti), "1", ttl).await?;
        tracing::debug!(jti = %jti, ttl_seconds = ttl, "Token added to denylist");
        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: &str) -> DomainResult<bool> {
        Ok(self.client.exists(&self.key(jti)).await?)
    }
}
