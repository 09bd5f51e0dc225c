//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    ENV_PRODUCTION, MIN_JWT_SECRET_LENGTH, RATE_LIMIT_REQUESTS, RATE_LIMIT_WINDOW_SECONDS,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Redis is optional; without it rate limiting is kept in process memory.
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub rate_limit_requests: u64,
    pub rate_limit_window_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("rate_limit_requests", &self.rate_limit_requests)
            .field("rate_limit_window_seconds", &self.rate_limit_window_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails if JWT_SECRET is missing in a release build or shorter than
    /// the minimum length.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let mut config = Self::with_secret(jwt_secret)?;
        config.database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        config.redis_url = env::var("REDIS_URL").ok().filter(|url| !url.is_empty());
        config.jwt_expiration_hours = parse_var("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS);
        config.server_host =
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        config.server_port = parse_var("SERVER_PORT", DEFAULT_SERVER_PORT);
        config.environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        config.rate_limit_requests = parse_var("RATE_LIMIT_REQUESTS", RATE_LIMIT_REQUESTS);
        config.rate_limit_window_seconds =
            parse_var("RATE_LIMIT_WINDOW_SECONDS", RATE_LIMIT_WINDOW_SECONDS);

        Ok(config)
    }

    /// Build a configuration with defaults and the given signing secret.
    pub fn with_secret(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: None,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            environment: "development".to_string(),
            rate_limit_requests: RATE_LIMIT_REQUESTS,
            rate_limit_window_seconds: RATE_LIMIT_WINDOW_SECONDS,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Whether this is a production deployment (hides error details).
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(ENV_PRODUCTION)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(Config::with_secret("too-short").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_secret("a-test-secret-that-is-long-enough-1234").unwrap();
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.rate_limit_requests, 100);
        assert_eq!(config.rate_limit_window_seconds, 900);
        assert!(!config.is_production());
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::with_secret("a-test-secret-that-is-long-enough-1234").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("a-test-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
