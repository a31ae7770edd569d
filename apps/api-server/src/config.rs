//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending schema migrations before serving.
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var("DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                ..defaults
            }
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            run_migrations: env::var("DB_RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
