//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{non_empty, parse_or, ConfigError};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Single origin allowed by CORS
    pub frontend_url: String,

    /// Maximum JSON payload size in bytes
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3001,
            frontend_url: String::from("http://localhost:3000"),
            max_payload_size: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create from `SERVER_HOST`, `PORT` and `FRONTEND_URL`
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: non_empty(lookup, "SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(lookup, "PORT", defaults.port)?,
            frontend_url: non_empty(lookup, "FRONTEND_URL").unwrap_or(defaults.frontend_url),
            max_payload_size: defaults.max_payload_size,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
