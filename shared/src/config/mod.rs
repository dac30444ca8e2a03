//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing and password hashing configuration
//! - `cache` - Redis configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Global request rate limiting
//! - `server` - HTTP server and CORS configuration
//!
//! Every sub-configuration is built from a variable lookup so that the same
//! code path serves the process environment and test fixtures.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub use auth::{JwtConfig, PasswordConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Errors raised while assembling configuration at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("JWT_SECRET and JWT_REFRESH_SECRET must differ")]
    SharedSigningSecret,
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit key/value map
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Signing secrets are validated here so that a misconfigured process
    /// fails before any connection is opened.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup)?;
        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            cache: CacheConfig::from_lookup(&lookup),
            jwt: JwtConfig::from_lookup(&lookup)?,
            password: PasswordConfig::from_lookup(&lookup)?,
            rate_limit: RateLimitConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup, environment),
        })
    }
}

/// Read a variable, treating blank values as absent
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse a variable, falling back to `default` when it is absent
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Parse a duration written as `<n>s`, `<n>m`, `<n>h`, `<n>d` or bare seconds
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: u64 = digits.parse().ok()?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };
    amount.checked_mul(multiplier).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            ("JWT_SECRET", "access-secret"),
            ("JWT_REFRESH_SECRET", "refresh-secret"),
        ])
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("45"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("15w"), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_defaults_with_only_secrets() {
        let config = AppConfig::from_map(&minimal()).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.frontend_url, "http://localhost:3000");
        assert_eq!(config.jwt.access_token_expiry, Duration::from_secs(900));
        assert_eq!(config.jwt.refresh_token_expiry, Duration::from_secs(604_800));
        assert_eq!(config.jwt.issuer, "bomato");
        assert_eq!(config.jwt.audience, "bomato-users");
        assert_eq!(config.password.bcrypt_cost, 12);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_seconds, 900);
    }

    #[test]
    fn test_missing_access_secret_is_fatal() {
        let mut map = minimal();
        map.remove("JWT_SECRET");
        assert_eq!(
            AppConfig::from_map(&map).unwrap_err(),
            ConfigError::Missing { key: "JWT_SECRET".to_string() }
        );
    }

    #[test]
    fn test_blank_refresh_secret_is_fatal() {
        let mut map = minimal();
        map.insert("JWT_REFRESH_SECRET".to_string(), "   ".to_string());
        assert_eq!(
            AppConfig::from_map(&map).unwrap_err(),
            ConfigError::Missing { key: "JWT_REFRESH_SECRET".to_string() }
        );
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let map = vars(&[("JWT_SECRET", "same"), ("JWT_REFRESH_SECRET", "same")]);
        assert_eq!(
            AppConfig::from_map(&map).unwrap_err(),
            ConfigError::SharedSigningSecret
        );
    }

    #[test]
    fn test_invalid_expiry_rejected() {
        let mut map = minimal();
        map.insert("JWT_EXPIRE".to_string(), "soon".to_string());
        assert!(matches!(
            AppConfig::from_map(&map),
            Err(ConfigError::Invalid { key, .. }) if key == "JWT_EXPIRE"
        ));
    }

    #[test]
    fn test_overrides_applied() {
        let mut map = minimal();
        map.insert("PORT".to_string(), "8080".to_string());
        map.insert("NODE_ENV".to_string(), "production".to_string());
        map.insert("JWT_EXPIRE".to_string(), "1h".to_string());
        map.insert("BCRYPT_COST".to_string(), "10".to_string());

        let config = AppConfig::from_map(&map).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.environment.is_production());
        assert_eq!(config.jwt.access_token_expiry, Duration::from_secs(3600));
        assert_eq!(config.password.bcrypt_cost, 10);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut map = minimal();
        map.insert("PORT".to_string(), "not-a-port".to_string());
        assert!(matches!(
            AppConfig::from_map(&map),
            Err(ConfigError::Invalid { key, .. }) if key == "PORT"
        ));
    }
}
