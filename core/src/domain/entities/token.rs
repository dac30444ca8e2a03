//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which class of token a claim set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    /// Subject email
    pub email: String,

    /// Token class tag
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Builds a claim set expiring `lifetime` after `issued_at`
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        token_type: TokenType,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: chrono::Duration,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            token_type,
            iss: issuer.into(),
            aud: audience.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the token has expired at the given time
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
