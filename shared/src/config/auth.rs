//! Authentication configuration: token signing and password hashing

use std::time::Duration;

use serde::Serialize;

use super::{non_empty, parse_duration, parse_or, ConfigError};

/// JWT issuer claim shared by every token
pub const TOKEN_ISSUER: &str = "bomato";

/// JWT audience claim shared by every token
pub const TOKEN_AUDIENCE: &str = "bomato-users";

/// JWT authentication configuration
///
/// Access and refresh tokens are signed with distinct secrets.
#[derive(Debug, Clone, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    #[serde(skip_serializing)]
    pub access_secret: String,

    /// Secret for signing refresh tokens
    #[serde(skip_serializing)]
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

impl JwtConfig {
    /// Create a configuration with the given secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry: Duration::from_secs(15 * 60),
            refresh_token_expiry: Duration::from_secs(7 * 24 * 60 * 60),
            issuer: TOKEN_ISSUER.to_string(),
            audience: TOKEN_AUDIENCE.to_string(),
        }
    }

    /// Set access token lifetime
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access_token_expiry = expiry;
        self
    }

    /// Set refresh token lifetime
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_token_expiry = expiry;
        self
    }

    /// Create from `JWT_SECRET`, `JWT_REFRESH_SECRET`, `JWT_EXPIRE` and `JWT_REFRESH_EXPIRE`
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_secret = required(lookup, "JWT_SECRET")?;
        let refresh_secret = required(lookup, "JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSigningSecret);
        }

        let config = Self::new(access_secret, refresh_secret)
            .with_access_expiry(expiry(lookup, "JWT_EXPIRE", "15m")?)
            .with_refresh_expiry(expiry(lookup, "JWT_REFRESH_EXPIRE", "7d")?);
        Ok(config)
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    /// Create from `BCRYPT_COST`
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost = parse_or(lookup, "BCRYPT_COST", 12u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST".to_string(),
                value: bcrypt_cost.to_string(),
            });
        }
        Ok(Self { bcrypt_cost })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })
}

fn expiry<F>(lookup: &F, key: &str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, key).unwrap_or_else(|| default.to_string());
    match parse_duration(&raw) {
        Some(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}
