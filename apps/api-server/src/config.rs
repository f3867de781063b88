//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// HTTP worker threads; `None` lets actix pick one per core.
    pub workers: Option<usize>,
    /// Seconds a graceful stop waits for open connections.
    pub shutdown_timeout: u64,
    /// `None` runs the server over the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Apply pending schema migrations after connecting.
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            shutdown_timeout: 30,
            database: None,
            run_migrations: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(config.max_connections);
            config.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(config.min_connections);
            config
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            workers: parse_var("WORKERS"),
            shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT").unwrap_or(defaults.shutdown_timeout),
            database,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.run_migrations),
        }
    }

    /// Loopback config on an ephemeral port, in-memory store.
    pub fn ephemeral() -> Self {
        Self {
            port: 0,
            workers: Some(1),
            shutdown_timeout: 5,
            ..Self::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
