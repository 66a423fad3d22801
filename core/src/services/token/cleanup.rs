//! Background sweep of expired refresh tokens

use std::sync::Arc;

use auth_shared::CleanupConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenStore;

use super::generator::{RandomRefreshTokenGenerator, RefreshTokenGenerator};
use super::service::TokenLifecycleService;

/// Periodically removes expired refresh records from the store
pub struct TokenCleanupService<S, G = RandomRefreshTokenGenerator>
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    service: Arc<TokenLifecycleService<S, G>>,
    config: CleanupConfig,
}

impl<S, G> TokenCleanupService<S, G>
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    pub fn new(service: Arc<TokenLifecycleService<S, G>>, config: CleanupConfig) -> Self {
        Self { service, config }
    }

    /// Run a single cleanup cycle
    ///
    /// A store failure is recorded in the result rather than returned, so
    /// one bad cycle does not stop the background task.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.service.expiry_sweep().await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!(deleted = count, "Deleted expired refresh tokens");
            }
            Err(e) => {
                error!(error = %e, "Failed to clean up expired refresh tokens");
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Spawns the sweep loop on the tokio runtime
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!(errors = ?result.errors, "Cleanup completed with errors");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Token cleanup cycle failed");
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup cycle
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired refresh tokens deleted
    pub expired_tokens_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
