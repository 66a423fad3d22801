//! # Token Lifecycle Core
//!
//! Domain layer for issuing, verifying, rotating and revoking bearer
//! credentials. This crate contains the token entities, the error taxonomy,
//! the refresh token store contract, and the services built on top of it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{fingerprint, AccessTokenClaims, RefreshTokenRecord, TokenPair};
pub use errors::{DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{InMemoryTokenStore, RotateOutcome, TokenStore};
pub use services::{
    AccessTokenCodec, AccessTokenVerifier, KeyMaterial, RandomRefreshTokenGenerator,
    RefreshTokenGenerator, TokenCleanupService, TokenLifecycleService, TokenServiceConfig,
};
