//! Configuration for the token lifecycle service

use auth_shared::{DatabaseConfig, JwtConfig};
use chrono::Duration;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Default upper bound for a single store call
pub const DEFAULT_STORE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Configuration for the token lifecycle service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Lifetime of minted access tokens
    pub access_token_lifetime: Duration,
    /// Lifetime of refresh records, fixed at creation
    pub refresh_token_lifetime: Duration,
    /// Deadline applied to every store call
    pub store_timeout: std::time::Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_lifetime: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl TokenServiceConfig {
    /// Builds the service configuration from the shared config sections
    pub fn from_configs(jwt: &JwtConfig, database: &DatabaseConfig) -> Self {
        Self {
            access_token_lifetime: lifetime_from_seconds(jwt.access_token_expiry),
            refresh_token_lifetime: lifetime_from_seconds(jwt.refresh_token_expiry),
            store_timeout: std::time::Duration::from_millis(database.statement_timeout_ms),
        }
    }

    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }

    pub fn with_store_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_token_lifetime: lifetime_from_seconds(jwt.access_token_expiry),
            refresh_token_lifetime: lifetime_from_seconds(jwt.refresh_token_expiry),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Saturates instead of panicking on lifetimes beyond the `Duration` range
fn lifetime_from_seconds(seconds: i64) -> Duration {
    Duration::milliseconds(seconds.saturating_mul(1_000))
}
