//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::non_empty;

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    #[serde(skip_serializing)]
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Number of connection attempts before giving up
    pub max_retries: u32,

    /// Prefix prepended to every key
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            max_retries: 3,
            key_prefix: String::from("bomato"),
        }
    }
}

impl CacheConfig {
    /// Create from `REDIS_URL`
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            url: non_empty(lookup, "REDIS_URL").unwrap_or(defaults.url),
            ..Self::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build a namespaced key
    pub fn key(&self, parts: &[&str]) -> String {
        let mut key = self.key_prefix.clone();
        for part in parts {
            key.push(':');
            key.push_str(part);
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespacing() {
        let config = CacheConfig::default();
        assert_eq!(config.key(&["denylist", "abc"]), "bomato:denylist:abc");
        assert_eq!(config.key(&[]), "bomato");
    }
}
