//! Domain entities representing issued credentials.

pub mod token;

// Re-export commonly used types
pub use token::{
    fingerprint, AccessTokenClaims, RefreshTokenRecord, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
