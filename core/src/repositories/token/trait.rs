//! Token repository trait defining the access-token denylist.
//!
//! Tokens are stateless; the only server-side token state is the set of
//! revoked token identifiers, each kept until the token would expire anyway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Repository trait for revoked token identifiers
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Add a token identifier to the denylist until `expires_at`
    ///
    /// Entries whose expiry is already in the past need not be stored.
    async fn blacklist_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Check whether a token identifier has been revoked
    async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, DomainError>;
}
