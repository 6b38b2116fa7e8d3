//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Upper bound for draining requests and closing the pool on shutdown
    pub shutdown_timeout: Duration,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl FromEnv for Config {
    /// Reads `APP_ENV`, `HOST`/`PORT`, `DATABASE_URL` and the `DB_*` pool
    /// settings, `SHUTDOWN_TIMEOUT_SECS` (default 30) and `RUN_MIGRATIONS`
    /// (default true).
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            shutdown_timeout: Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", 30)?),
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
        })
    }
}
