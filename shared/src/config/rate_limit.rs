//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, ConfigError};

/// Global per-client request limit over a fixed window
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Maximum requests per client IP within one window
    pub max_requests: u64,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_seconds: 15 * 60,
        }
    }
}

impl RateLimitConfig {
    /// Create from `RATE_LIMIT_ENABLED`, `RATE_LIMIT_MAX_REQUESTS` and `RATE_LIMIT_WINDOW_SECONDS`
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            enabled: parse_or(lookup, "RATE_LIMIT_ENABLED", defaults.enabled)?,
            max_requests: parse_or(lookup, "RATE_LIMIT_MAX_REQUESTS", defaults.max_requests)?,
            window_seconds: parse_or(lookup, "RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds)?,
        };
        if config.window_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_WINDOW_SECONDS".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(config)
    }
}
