//! Token service module
//!
//! This module handles all token-related operations including:
//! - RS256 key material loading
//! - Access token signing and verification
//! - Refresh token generation, rotation and revocation
//! - Background cleanup of expired refresh tokens

mod cleanup;
mod codec;
mod config;
mod generator;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupService};
pub use codec::{AccessTokenCodec, AccessTokenVerifier, SIGNING_ALGORITHM};
pub use config::{TokenServiceConfig, DEFAULT_STORE_TIMEOUT};
pub use generator::{RandomRefreshTokenGenerator, RefreshTokenGenerator, REFRESH_TOKEN_BYTES};
pub use key_manager::KeyMaterial;
pub use service::TokenLifecycleService;
