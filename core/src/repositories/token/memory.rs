//! In-memory implementation of `TokenStore`
//!
//! Used by tests and local development. Every operation runs under one
//! `RwLock`, so `rotate` is atomic with respect to concurrent callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::StoreError;

use super::store::{RotateOutcome, TokenStore};

/// Refresh token store backed by a `HashMap`
#[derive(Default)]
pub struct InMemoryTokenStore {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Records for `subject` that are neither revoked nor expired at `now`
    pub async fn active_for_subject(&self, subject: &str, now: DateTime<Utc>) -> Vec<RefreshTokenRecord> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.subject == subject && r.is_active_at(now))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id) {
            return Err(StoreError::DuplicateId);
        }

        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn revoke(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(id).map(|r| r.revoke()).unwrap_or(false))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, r| r.expires_at >= now);

        Ok(before - records.len())
    }

    async fn rotate(
        &self,
        old_id: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RotateOutcome, StoreError> {
        let mut records = self.records.write().await;

        if records.contains_key(&replacement.id) {
            return Err(StoreError::DuplicateId);
        }

        match records.get_mut(old_id) {
            None => return Ok(RotateOutcome::Missing),
            Some(old) => {
                if !old.revoke() {
                    return Ok(RotateOutcome::AlreadyRevoked);
                }
            }
        }

        records.insert(replacement.id.clone(), replacement);
        Ok(RotateOutcome::Rotated)
    }
}
