//! # Infrastructure Layer
//!
//! Concrete adapters for the token lifecycle core. The only adapter is the
//! MySQL implementation of `TokenStore`, built on SQLx, together with the
//! connection pool it runs on.

// Re-export core types for convenience
pub use auth_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlTokenStore, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
