//! Error kinds for token handling and the refresh token store

use thiserror::Error;

/// Token-related errors
///
/// Access token failures (`TokenInvalid`, `TokenExpired`) and refresh
/// denials (`RefreshToken*`) are client-facing; `KeyLoadError` is fatal at
/// startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to load signing keys: {message}")]
    KeyLoadError { message: String },

    #[error("Invalid access token")]
    TokenInvalid,

    #[error("Access token expired")]
    TokenExpired,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token revoked")]
    RefreshTokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::KeyLoadError { .. } => "KEY_LOAD_ERROR",
            TokenError::TokenInvalid => "TOKEN_INVALID",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::RefreshTokenNotFound => "REFRESH_TOKEN_NOT_FOUND",
            TokenError::RefreshTokenRevoked => "REFRESH_TOKEN_REVOKED",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    /// The caller must re-authenticate to obtain new credentials
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            TokenError::TokenInvalid
                | TokenError::TokenExpired
                | TokenError::RefreshTokenNotFound
                | TokenError::RefreshTokenRevoked
                | TokenError::RefreshTokenExpired
        )
    }
}

/// Errors reported by a `TokenStore` implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Refresh token id already exists")]
    DuplicateId,

    #[error("Token store failure: {message}")]
    Backend { message: String },

    #[error("Token store call cancelled")]
    Cancelled,
}

impl StoreError {
    /// Convenience constructor for backend failures
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::DuplicateId => "DUPLICATE_ID",
            StoreError::Backend { .. } => "STORE_ERROR",
            StoreError::Cancelled => "CANCELLED",
        }
    }
}
