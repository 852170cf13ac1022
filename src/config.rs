//! Environment configuration
//!
//! `DB_URL` is required; its absence is fatal at startup. `ENV` and `PORT`
//! are optional deployment metadata with sensible defaults.

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;

/// Service configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URI.
    pub db_url: String,
    /// Deployment environment tag (logging only).
    pub env: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let db_url =
            std::env::var("DB_URL").context("DB_URL environment variable is not set")?;

        let env = std::env::var("ENV").unwrap_or_else(|_| "local".to_string());
        let port = parse_port(std::env::var("PORT").ok());

        Ok(Self { db_url, env, port })
    }
}

/// Parse the PORT variable, falling back to the default when missing or
/// unparseable.
fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_default_when_missing() {
        assert_eq!(parse_port(None), 8080);
    }

    #[test]
    fn test_port_default_when_unparseable() {
        assert_eq!(parse_port(Some("eighty".to_string())), 8080);
    }

    #[test]
    fn test_port_parsed() {
        assert_eq!(parse_port(Some("3000".to_string())), 3000);
    }
}
