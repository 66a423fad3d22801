//! Configuration module
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token lifetimes and signing key locations
//! - `cleanup` - Background sweep of expired refresh tokens
//! - `database` - Refresh token store connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cleanup;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cleanup::CleanupConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token lifetimes and key locations
    pub jwt: JwtConfig,

    /// Expiry sweep configuration
    pub cleanup: CleanupConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from plain environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cleanup: CleanupConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load layered configuration
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. `config/default.toml` (optional)
    /// 2. `config/{environment}.toml` (optional)
    /// 3. `APP__`-prefixed environment variables, e.g. `APP__JWT__ACCESS_TOKEN_EXPIRY`
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = config.try_deserialize()?;
        app.environment = environment;
        Ok(app)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), String> {
        self.jwt.validate()?;
        if self.database.statement_timeout_ms == 0 {
            return Err("database.statement_timeout_ms must be positive".to_string());
        }
        if self.cleanup.enabled && self.cleanup.interval_seconds == 0 {
            return Err("cleanup.interval_seconds must be positive when cleanup is enabled".to_string());
        }
        Ok(())
    }
}
