//! MySQL implementation of the `TokenStore` contract.
//!
//! Refresh token ids are bearer secrets, so only their SHA-256 digest is
//! persisted. Every lookup hashes the presented id first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};

use auth_core::domain::entities::token::{fingerprint, RefreshTokenRecord};
use auth_core::errors::StoreError;
use auth_core::repositories::{RotateOutcome, TokenStore};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        token_hash CHAR(64) NOT NULL PRIMARY KEY,
        subject VARCHAR(255) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        revoked BOOLEAN NOT NULL DEFAULT FALSE,
        INDEX idx_refresh_tokens_expires_at (expires_at)
    )
"#;

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens (token_hash, subject, created_at, expires_at, revoked)
    VALUES (?, ?, ?, ?, ?)
"#;

const REVOKE_TOKEN: &str = r#"
    UPDATE refresh_tokens
    SET revoked = TRUE
    WHERE token_hash = ? AND revoked = FALSE
"#;

/// MySQL implementation of `TokenStore`
pub struct MySqlTokenStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenStore {
    /// Create a new MySQL token store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a refresh token id using SHA-256
    ///
    /// # Returns
    /// Hexadecimal string representation of the SHA-256 hash
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Create the `refresh_tokens` table if it does not exist
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Ensuring refresh_tokens table exists");

        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to create refresh_tokens table", e))?;

        Ok(())
    }

    /// Rebuild a record from its row; the raw id is the one presented
    fn row_to_record(id: &str, row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, StoreError> {
        Ok(RefreshTokenRecord {
            id: id.to_string(),
            subject: row
                .try_get("subject")
                .map_err(|e| store_error("Failed to get subject", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| store_error("Failed to get expires_at", e))?,
            revoked: row
                .try_get("revoked")
                .map_err(|e| store_error("Failed to get revoked", e))?,
        })
    }
}

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), StoreError> {
        sqlx::query(INSERT_TOKEN)
            .bind(Self::hash_token(&record.id))
            .bind(&record.subject)
            .bind(Utc::now())
            .bind(record.expires_at)
            .bind(record.revoked)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to save refresh token", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let query = r#"
            SELECT subject, expires_at, revoked
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(id, &row)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(REVOKE_TOKEN)
            .bind(Self::hash_token(id))
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete expired refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    /// Conditional revoke and insert in one transaction
    ///
    /// The `UPDATE ... AND revoked = FALSE` takes the row lock, so of two
    /// concurrent rotations of one id only the first sees an affected row.
    /// Any early return drops the transaction, which rolls it back.
    async fn rotate(
        &self,
        old_id: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RotateOutcome, StoreError> {
        let old_hash = Self::hash_token(old_id);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin rotation", e))?;

        let updated = sqlx::query(REVOKE_TOKEN)
            .bind(&old_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to revoke rotated token", e))?;

        if updated.rows_affected() == 0 {
            let existing = sqlx::query("SELECT 1 FROM refresh_tokens WHERE token_hash = ?")
                .bind(&old_hash)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| store_error("Failed to check rotated token", e))?;

            tx.rollback()
                .await
                .map_err(|e| store_error("Failed to roll back rotation", e))?;

            return Ok(match existing {
                Some(_) => RotateOutcome::AlreadyRevoked,
                None => RotateOutcome::Missing,
            });
        }

        sqlx::query(INSERT_TOKEN)
            .bind(Self::hash_token(&replacement.id))
            .bind(&replacement.subject)
            .bind(Utc::now())
            .bind(replacement.expires_at)
            .bind(replacement.revoked)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to save replacement token", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit rotation", e))?;

        tracing::debug!(
            refresh = %fingerprint(old_id),
            replacement = %replacement.fingerprint(),
            "Rotation committed"
        );

        Ok(RotateOutcome::Rotated)
    }
}

/// Maps a SQLx error onto the store taxonomy
pub(crate) fn store_error(context: &str, error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateId,
        _ => StoreError::backend(format!("{}: {}", context, error)),
    }
}
