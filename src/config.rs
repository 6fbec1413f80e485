use std::net::SocketAddr;

use thiserror::Error;

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// DATABASE_URL defaults to "sqlite://events.db"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "sqlite://events.db".to_string());

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("LISTEN_ADDR", "must be a valid socket address"))?;

        Ok(Config {
            listen_addr,
            database_url,
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.database_url, "sqlite://events.db");
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("LISTEN_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = Config::from_lookup(lookup_in(&[("LISTEN_ADDR", "localhost")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for LISTEN_ADDR: must be a valid socket address"
        );
    }
}
