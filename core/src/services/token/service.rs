//! Token lifecycle service: issue, verify, refresh and revoke

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{fingerprint, AccessTokenClaims, RefreshTokenRecord, TokenPair};
use crate::errors::{DomainError, DomainResult, StoreError, TokenError};
use crate::repositories::{RotateOutcome, TokenStore};

use super::codec::AccessTokenCodec;
use super::config::TokenServiceConfig;
use super::generator::{RandomRefreshTokenGenerator, RefreshTokenGenerator};
use super::key_manager::KeyMaterial;

/// A colliding refresh token id is regenerated once, never more
const MAX_ID_ATTEMPTS: usize = 2;

/// Orchestrates the access/refresh token lifecycle
///
/// The service holds no mutable state of its own. Every refresh record
/// transition goes through the `TokenStore`, and every store call is
/// bounded by `TokenServiceConfig::store_timeout`.
pub struct TokenLifecycleService<S, G = RandomRefreshTokenGenerator>
where
    S: TokenStore,
    G: RefreshTokenGenerator,
{
    store: Arc<S>,
    codec: AccessTokenCodec,
    generator: G,
    config: TokenServiceConfig,
}

impl<S: TokenStore> TokenLifecycleService<S> {
    /// Creates a service using the OS-backed refresh token generator
    pub fn new(store: Arc<S>, keys: Arc<KeyMaterial>, config: TokenServiceConfig) -> Self {
        Self::with_generator(store, keys, RandomRefreshTokenGenerator, config)
    }
}

impl<S, G> TokenLifecycleService<S, G>
where
    S: TokenStore,
    G: RefreshTokenGenerator,
{
    pub fn with_generator(
        store: Arc<S>,
        keys: Arc<KeyMaterial>,
        generator: G,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            store,
            codec: AccessTokenCodec::new(keys),
            generator,
            config,
        }
    }

    /// Issues a fresh access/refresh pair for `subject`
    ///
    /// The pair is returned only after the refresh record is durable.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access token signed, refresh record stored
    /// * `Err(DomainError::Validation)` - Empty subject
    /// * `Err(DomainError::Store)` - The record could not be stored
    pub async fn issue_pair(&self, subject: &str) -> DomainResult<TokenPair> {
        if subject.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "subject must not be empty".to_string(),
            });
        }

        let now = Utc::now();
        let access_token = self
            .codec
            .sign(subject, now, self.config.access_token_lifetime)?;

        let mut attempt = 1;
        let refresh_token = loop {
            let id = self.generator.generate();
            let record =
                RefreshTokenRecord::issue(id.clone(), subject, now, self.config.refresh_token_lifetime)?;

            match self.bounded("create", self.store.create(record)).await {
                Ok(()) => break id,
                Err(StoreError::DuplicateId) if attempt < MAX_ID_ATTEMPTS => {
                    warn!(subject, "Refresh token id collision, regenerating");
                    attempt += 1;
                }
                Err(StoreError::DuplicateId) => return Err(id_collision()),
                Err(e) => {
                    error!(subject, error = %e, "Failed to store refresh token");
                    return Err(e.into());
                }
            }
        };

        info!(subject, refresh = %fingerprint(&refresh_token), "Issued token pair");

        Ok(self.pair(access_token, refresh_token))
    }

    /// Verifies an access token without touching the store
    pub fn verify_access(&self, access_token: &str) -> Result<AccessTokenClaims, TokenError> {
        self.codec.verify(access_token)
    }

    /// Exchanges a refresh token for a new pair, revoking the old one
    ///
    /// The old record is revoked and the replacement stored in one
    /// `TokenStore::rotate` call. Of several concurrent refreshes of the
    /// same token at most one succeeds; the others see `RefreshTokenRevoked`
    /// or `RefreshTokenNotFound`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair for the same subject
    /// * `Err(TokenError::RefreshTokenNotFound)` - Never issued, or swept
    /// * `Err(TokenError::RefreshTokenRevoked)` - Revoked or already rotated
    /// * `Err(TokenError::RefreshTokenExpired)` - Past its expiry
    /// * `Err(DomainError::Store)` - Store failure or timeout
    pub async fn refresh_pair(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let token_fp = fingerprint(refresh_token);
        let now = Utc::now();

        let record = self
            .bounded("find_by_id", self.store.find_by_id(refresh_token))
            .await
            .map_err(|e| {
                error!(refresh = %token_fp, error = %e, "Failed to look up refresh token");
                e
            })?
            .ok_or_else(|| {
                warn!(refresh = %token_fp, "Refresh denied: unknown token");
                TokenError::RefreshTokenNotFound
            })?;

        if record.revoked {
            warn!(
                refresh = %token_fp,
                subject = %record.subject,
                "Refresh denied: token already revoked, possible replay"
            );
            return Err(TokenError::RefreshTokenRevoked.into());
        }

        if record.is_expired_at(now) {
            info!(refresh = %token_fp, subject = %record.subject, "Refresh denied: token expired");
            return Err(TokenError::RefreshTokenExpired.into());
        }

        let access_token = self
            .codec
            .sign(&record.subject, now, self.config.access_token_lifetime)?;

        let mut attempt = 1;
        loop {
            let id = self.generator.generate();
            let replacement = RefreshTokenRecord::issue(
                id.clone(),
                record.subject.as_str(),
                now,
                self.config.refresh_token_lifetime,
            )?;

            match self
                .bounded("rotate", self.store.rotate(refresh_token, replacement))
                .await
            {
                Ok(RotateOutcome::Rotated) => {
                    info!(
                        refresh = %token_fp,
                        replacement = %fingerprint(&id),
                        subject = %record.subject,
                        "Rotated refresh token"
                    );
                    return Ok(self.pair(access_token, id));
                }
                Ok(RotateOutcome::AlreadyRevoked) => {
                    warn!(
                        refresh = %token_fp,
                        subject = %record.subject,
                        "Refresh denied: token rotated concurrently"
                    );
                    return Err(TokenError::RefreshTokenRevoked.into());
                }
                Ok(RotateOutcome::Missing) => {
                    warn!(refresh = %token_fp, "Refresh denied: token removed during refresh");
                    return Err(TokenError::RefreshTokenNotFound.into());
                }
                Err(StoreError::DuplicateId) if attempt < MAX_ID_ATTEMPTS => {
                    warn!(refresh = %token_fp, "Refresh token id collision, regenerating");
                    attempt += 1;
                }
                Err(StoreError::DuplicateId) => return Err(id_collision()),
                Err(e) => {
                    error!(refresh = %token_fp, error = %e, "Failed to rotate refresh token");
                    return Err(e.into());
                }
            }
        }
    }

    /// Revokes a refresh token
    ///
    /// Succeeds for unknown and already revoked tokens alike.
    pub async fn revoke_refresh(&self, refresh_token: &str) -> DomainResult<()> {
        let token_fp = fingerprint(refresh_token);

        let transitioned = self
            .bounded("revoke", self.store.revoke(refresh_token))
            .await
            .map_err(|e| {
                error!(refresh = %token_fp, error = %e, "Failed to revoke refresh token");
                e
            })?;

        if transitioned {
            info!(refresh = %token_fp, "Revoked refresh token");
        } else {
            debug!(refresh = %token_fp, "Refresh token already revoked or unknown");
        }

        Ok(())
    }

    /// Deletes every refresh record that expired before now
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records removed
    pub async fn expiry_sweep(&self) -> DomainResult<usize> {
        let now = Utc::now();
        let deleted = self
            .bounded("delete_expired", self.store.delete_expired(now))
            .await?;

        debug!(deleted, "Expiry sweep finished");
        Ok(deleted)
    }

    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_lifetime,
            self.config.refresh_token_lifetime,
        )
    }

    /// Runs a store call under the configured deadline
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Token store call timed out"
                );
                Err(StoreError::Cancelled)
            }
        }
    }
}

fn id_collision() -> DomainError {
    error!("Refresh token id collided twice");
    DomainError::Internal {
        message: "refresh token id collision".to_string(),
    }
}
