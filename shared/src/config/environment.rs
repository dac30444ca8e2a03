//! Environment configuration module

use serde::{Deserialize, Serialize};

use super::{non_empty, ConfigError};

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Resolve from `ENVIRONMENT`, `NODE_ENV` or `RUST_ENV`
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = ["ENVIRONMENT", "NODE_ENV", "RUST_ENV"]
            .into_iter()
            .find(|key| non_empty(lookup, key).is_some());

        match key {
            Some(key) => {
                let raw = non_empty(lookup, key).unwrap_or_default();
                raw.parse().map_err(|_| ConfigError::Invalid {
                    key: key.to_string(),
                    value: raw,
                })
            }
            None => Ok(Environment::Development),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Create from `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_lookup<F>(lookup: &F, environment: Environment) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_level = if environment.is_development() { "debug" } else { "info" };
        let level = non_empty(lookup, "LOG_LEVEL").unwrap_or_else(|| default_level.to_string());
        let format = match non_empty(lookup, "LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { level, format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Staging));
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_node_env_fallback() {
        let lookup = |key: &str| (key == "NODE_ENV").then(|| "production".to_string());
        assert_eq!(Environment::from_lookup(&lookup), Ok(Environment::Production));
    }

    #[test]
    fn test_json_log_format() {
        let lookup = |key: &str| (key == "LOG_FORMAT").then(|| "json".to_string());
        let config = LoggingConfig::from_lookup(&lookup, Environment::Production);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }
}
