//! Configuration module for the batepapo service.
//!
//! Configuration comes from environment variables, with sensible defaults so
//! the server starts against a local MongoDB with no setup.

use crate::{ChatError, Result};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Database name.
    pub name: String,
}

fn default_database_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "batepapo".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            name: default_database_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `DATABASE_URL`, `DATABASE_NAME`, `HOST`, `PORT`,
    /// `LOG_LEVEL`. Missing variables fall back to defaults; an unparsable
    /// `PORT` is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ChatError::Config(format!("invalid PORT value: {raw}")))?,
            None => default_port(),
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
                name: lookup("DATABASE_NAME").unwrap_or_else(default_database_name),
            },
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let map = HashMap::new();
        let config = Config::from_lookup(lookup_from(&map)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "mongodb://localhost:27017");
        assert_eq!(config.database.name, "batepapo");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let mut map = HashMap::new();
        map.insert("HOST", "127.0.0.1");
        map.insert("PORT", "8080");
        map.insert("DATABASE_URL", "mongodb://db.example:27017");
        map.insert("DATABASE_NAME", "chat_test");
        map.insert("LOG_LEVEL", "debug");

        let config = Config::from_lookup(lookup_from(&map)).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "mongodb://db.example:27017");
        assert_eq!(config.database.name, "chat_test");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut map = HashMap::new();
        map.insert("PORT", "not-a-port");

        let err = Config::from_lookup(lookup_from(&map)).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
        assert!(err.to_string().contains("not-a-port"));
    }

    #[test]
    fn test_port_out_of_range_is_config_error() {
        let mut map = HashMap::new();
        map.insert("PORT", "70000");

        let err = Config::from_lookup(lookup_from(&map)).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }
}
