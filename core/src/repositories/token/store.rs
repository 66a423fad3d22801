//! Token store trait defining the persistence contract for refresh tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::StoreError;

/// Result of an atomic rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The old record was revoked and the replacement stored
    Rotated,
    /// The old record was already revoked; nothing was written
    AlreadyRevoked,
    /// No record exists for the old id; nothing was written
    Missing,
}

/// Durable record of issued refresh tokens
///
/// Implementations must give read-after-write visibility: once `create`,
/// `revoke` or `rotate` returns `Ok`, every later `find_by_id` observes it.
///
/// # Security Considerations
/// - `revoke` must be a conditional update (only `revoked = false` rows),
///   so that concurrent rotations of one id cannot both succeed
/// - Implementations should avoid storing the raw id where the backend is
///   shared or backed up
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a new record
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(StoreError::DuplicateId)` - A record with this id already exists
    /// * `Err(StoreError::Backend)` - Persistence failed
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), StoreError>;

    /// Look up a record by its id
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found, regardless of revoked/expired state
    /// * `Ok(None)` - No record with this id
    async fn find_by_id(&self, id: &str) -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Mark a record revoked if it is not already
    ///
    /// Idempotent: revoking a revoked or unknown id is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the `false -> true` transition
    /// * `Ok(false)` - Already revoked, or no such record
    async fn revoke(&self, id: &str) -> Result<bool, StoreError>;

    /// Delete every record whose `expires_at` is before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;

    /// Revoke `old_id` and store `replacement` as one step
    ///
    /// The old record is revoked only if it is currently not revoked; when
    /// that condition fails nothing is written.
    ///
    /// Stores that override this with a single critical section or
    /// transaction make no change on `Err(DuplicateId)`, so the caller may
    /// retry with a fresh id. The provided implementation only guarantees
    /// that when the replacement id already exists before the call. It
    /// revokes first and creates second, so a failure in between,
    /// including a concurrent `create` of the same replacement id, leaves
    /// the lineage revoked with no live child rather than two live
    /// records. Stores with transactions should override it.
    async fn rotate(
        &self,
        old_id: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RotateOutcome, StoreError> {
        if self.find_by_id(&replacement.id).await?.is_some() {
            return Err(StoreError::DuplicateId);
        }

        if !self.revoke(old_id).await? {
            return match self.find_by_id(old_id).await? {
                Some(_) => Ok(RotateOutcome::AlreadyRevoked),
                None => Ok(RotateOutcome::Missing),
            };
        }

        self.create(replacement).await?;
        Ok(RotateOutcome::Rotated)
    }
}
