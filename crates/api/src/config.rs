use std::str::FromStr;
use std::time::Duration;

use goods_cache::{DEFAULT_CAPACITY, DEFAULT_TTL};

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment (`local`, `dev`, `prod`); `prod` switches logs to JSON.
    pub app_env: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `4`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Redis URL. When unset the service caches in process memory.
    pub redis_url: Option<String>,
    pub redis_password: Option<String>,
    /// Lifetime of a cached good in seconds (default: `1200`).
    pub cache_ttl_secs: u64,
    /// Entry limit of the in-memory cache (default: `10000`).
    pub cache_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `APP_ENV`               | `local`                 |
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8080`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `4`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                    |
    /// | `DATABASE_URL`          | required                |
    /// | `REDIS_URL`             | unset                   |
    /// | `REDIS_PASSWORD`        | unset                   |
    /// | `CACHE_TTL_SECS`        | `1200`                  |
    /// | `CACHE_CAPACITY`        | `10000`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            app_env: var("APP_ENV").unwrap_or_else(|| "local".into()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var("PORT", var("PORT"), 8080)?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 4)?,
            shutdown_timeout_secs: parse_var(
                "SHUTDOWN_TIMEOUT_SECS",
                var("SHUTDOWN_TIMEOUT_SECS"),
                10,
            )?,
            database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            redis_url: var("REDIS_URL"),
            redis_password: var("REDIS_PASSWORD"),
            cache_ttl_secs: parse_var(
                "CACHE_TTL_SECS",
                var("CACHE_TTL_SECS"),
                DEFAULT_TTL.as_secs(),
            )?,
            cache_capacity: parse_var("CACHE_CAPACITY", var("CACHE_CAPACITY"), DEFAULT_CAPACITY)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("prod")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            value,
        }),
    }
}
