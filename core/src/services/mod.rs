//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{
    AccessTokenCodec, AccessTokenVerifier, CleanupResult, KeyMaterial, RandomRefreshTokenGenerator,
    RefreshTokenGenerator, TokenCleanupService, TokenLifecycleService, TokenServiceConfig,
};
