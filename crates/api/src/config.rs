use std::time::Duration;

use slangdex_core::retry::RetryPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on closing database connections after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Connection pool size (default: `20`).
    pub db_max_connections: u32,
    /// Backoff policy applied to store reads.
    pub read_retry: RetryPolicy,
    /// Insert the demo terms on start-up when the table is nearly empty.
    pub seed_demo_content: bool,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `DB_MAX_CONNECTIONS`    | `20`                    |
    /// | `READ_RETRY_ATTEMPTS`   | `3`                     |
    /// | `READ_RETRY_BASE_MS`    | `50`                    |
    /// | `SEED_DEMO_CONTENT`     | `false`                 |
    ///
    /// `DATABASE_URL` is read by the binary directly; `LOG_FORMAT` is read
    /// before configuration so start-up itself is logged.
    ///
    /// # Panics
    ///
    /// Panics on unparsable values. Misconfiguration should stop the
    /// process before it binds a port.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| slangdex_db::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let retry_attempts: u32 = std::env::var("READ_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("READ_RETRY_ATTEMPTS must be a valid u32");
        assert!(retry_attempts >= 1, "READ_RETRY_ATTEMPTS must be at least 1");

        let retry_base_ms: u64 = std::env::var("READ_RETRY_BASE_MS")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("READ_RETRY_BASE_MS must be a valid u64");

        let seed_demo_content = std::env::var("SEED_DEMO_CONTENT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            db_max_connections,
            read_retry: RetryPolicy {
                max_attempts: retry_attempts,
                initial_delay: Duration::from_millis(retry_base_ms),
                ..RetryPolicy::default()
            },
            seed_demo_content,
            jwt,
        }
    }
}
