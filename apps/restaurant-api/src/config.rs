//! Restaurant API configuration module.
//!
//! Configuration is read from environment variables once at startup, with
//! fallback to defaults, and then passed explicitly to every component.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Minimum signing-key length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

const DEV_JWT_SECRET: &str = "foodbuddy-restaurant-dev-secret-change-in-production";

/// Restaurant API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// gRPC server port
    pub grpc_port: u16,

    /// SQLite database file path
    pub database_path: String,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub jwt_ttl_secs: i64,

    /// Argon2 memory cost in KiB
    pub password_hash_memory_kib: u32,

    /// Argon2 iteration count
    pub password_hash_iterations: u32,

    /// Argon2 lanes
    pub password_hash_parallelism: u32,

    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Deployment environment name ("development", "production", ...)
    pub app_env: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env == "production";

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_production => {
                return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()))
            }
            Err(_) => DEV_JWT_SECRET.to_string(),
        };

        let config = ServiceConfig {
            grpc_port: parse_var("GRPC_PORT", 50052)?,

            database_path: env::var("DATABASE_PATH")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_else(|_| "./restaurant.db".to_string()),

            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 25)?,

            jwt_secret,

            jwt_ttl_secs: parse_var("JWT_TTL_SECS", 86_400)?, // 24 hours

            password_hash_memory_kib: parse_var("PASSWORD_HASH_MEMORY_KIB", 19_456)?,

            password_hash_iterations: parse_var("PASSWORD_HASH_ITERATIONS", 2)?,

            password_hash_parallelism: parse_var("PASSWORD_HASH_PARALLELISM", 1)?,

            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            app_env,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_env == "production" && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::WeakSecret(MIN_PRODUCTION_SECRET_LEN));
        }

        if self.jwt_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_TTL_SECS".to_string()));
        }

        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(())
    }
}

// The signing key must never reach the logs.
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("grpc_port", &self.grpc_port)
            .field("database_path", &self.database_path)
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("app_env", &self.app_env)
            .finish_non_exhaustive()
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("JWT_SECRET must be at least {0} bytes in production")]
    WeakSecret(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServiceConfig {
        ServiceConfig {
            grpc_port: 50052,
            database_path: "./restaurant.db".to_string(),
            db_max_connections: 25,
            jwt_secret: "short".to_string(),
            jwt_ttl_secs: 86_400,
            password_hash_memory_kib: 19_456,
            password_hash_iterations: 2,
            password_hash_parallelism: 1,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            app_env: "development".to_string(),
        }
    }

    #[test]
    fn test_short_secret_allowed_outside_production() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        let mut config = config();
        config.app_env = "production".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::WeakSecret(32))));

        config.jwt_secret = "x".repeat(MIN_PRODUCTION_SECRET_LEN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = config();
        config.jwt_ttl_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(v)) if v == "JWT_TTL_SECS"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("short"));
    }
}
