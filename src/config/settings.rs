//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use chrono::{Duration, Utc};
use thiserror::Error;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Start-up configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    jwt_secret: String,
    pub jwt_expiration_days: i64,
    pub hash_cost: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_days", &self.jwt_expiration_days)
            .field("hash_cost", &self.hash_cost)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration from explicit values, applying defaults for the
    /// server address and pool size.
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
        jwt_expiration_days: i64,
        hash_cost: u32,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} characters long", MIN_JWT_SECRET_LENGTH),
            });
        }
        if jwt_expiration_days < 1 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_DAYS",
                reason: "must be at least 1".to_string(),
            });
        }
        // Tokens issued now must get a representable expiry
        let representable = Duration::try_days(jwt_expiration_days)
            .and_then(|validity| Utc::now().checked_add_signed(validity))
            .is_some();
        if !representable {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_DAYS",
                reason: "token expiry would be out of range".to_string(),
            });
        }
        if hash_cost < 1 {
            return Err(ConfigError::Invalid {
                key: "HASH_COST",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            jwt_secret,
            jwt_expiration_days,
            hash_cost,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL`, `JWT_SECRET`, `JWT_EXPIRATION_DAYS` and `HASH_COST`
    /// are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(
            required("DATABASE_URL")?,
            required("JWT_SECRET")?,
            parse_required("JWT_EXPIRATION_DAYS")?,
            parse_required("HASH_COST")?,
        )?;

        if let Some(max) = parse_optional("DATABASE_MAX_CONNECTIONS")? {
            config.database_max_connections = max;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_optional("SERVER_PORT")? {
            config.server_port = port;
        }

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parse_required<T>(key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(key)?;
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn parse_optional<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_new_applies_defaults() {
        let config = Config::new("sqlite::memory:", SECRET, 1, 2).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);
        assert_eq!(config.jwt_secret_bytes(), SECRET.as_bytes());
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("sqlite::memory:", "too-short", 1, 2);
        assert!(matches!(result, Err(ConfigError::Invalid { key: "JWT_SECRET", .. })));
    }

    #[test]
    fn test_zero_validity_window_rejected() {
        let result = Config::new("sqlite::memory:", SECRET, 0, 2);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "JWT_EXPIRATION_DAYS", .. })
        ));
    }

    #[test]
    fn test_unrepresentable_validity_window_rejected() {
        for days in [1_000_000_000_000, 1_000_000_000, i64::MAX] {
            let result = Config::new("sqlite::memory:", SECRET, days, 2);
            assert!(matches!(
                result,
                Err(ConfigError::Invalid { key: "JWT_EXPIRATION_DAYS", .. })
            ));
        }
    }

    #[test]
    fn test_long_validity_window_accepted() {
        let config = Config::new("sqlite::memory:", SECRET, 3650, 2).unwrap();
        assert_eq!(config.jwt_expiration_days, 3650);
    }

    #[test]
    fn test_zero_hash_cost_rejected() {
        let result = Config::new("sqlite::memory:", SECRET, 1, 0);
        assert!(matches!(result, Err(ConfigError::Invalid { key: "HASH_COST", .. })));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db/bank", SECRET, 1, 2).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains(SECRET));
        assert!(!debug.contains("pw@db"));
        assert!(debug.contains("[REDACTED]"));
    }
}
