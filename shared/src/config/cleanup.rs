//! Expired refresh token sweep configuration

use serde::{Deserialize, Serialize};

/// Configuration for the background expiry sweep
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Whether the background sweep runs at all
    pub enabled: bool,

    /// Seconds between two sweeps
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("TOKEN_CLEANUP_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);
        let interval_seconds = std::env::var("TOKEN_CLEANUP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Self {
            enabled,
            interval_seconds,
        }
    }
}
