//! Configuration for the token service

use bomato_shared::config::auth::{JwtConfig, TOKEN_AUDIENCE, TOKEN_ISSUER};
use chrono::Duration;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for access tokens
    pub access_secret: String,
    /// Secret for refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_token_expiry: Duration,
    /// Refresh token lifetime
    pub refresh_token_expiry: Duration,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-please-change".to_string(),
            refresh_secret: "development-refresh-secret-please-change".to_string(),
            access_token_expiry: Duration::minutes(15),
            refresh_token_expiry: Duration::days(7),
            issuer: TOKEN_ISSUER.to_string(),
            audience: TOKEN_AUDIENCE.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let defaults = Self::default();
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_token_expiry: Duration::from_std(config.access_token_expiry)
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: Duration::from_std(config.refresh_token_expiry)
                .unwrap_or(defaults.refresh_token_expiry),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
