//! Domain error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{StoreError, TokenError};

use auth_shared::ErrorResponse;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Token(e) => e.error_code(),
            DomainError::Store(e) => e.error_code(),
        }
    }

    /// Infrastructure failures the caller may retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Store(StoreError::Backend { .. }) | DomainError::Store(StoreError::Cancelled)
        )
    }

    /// Builds the response body for this error
    ///
    /// Infrastructure details are not echoed back to clients.
    pub fn to_error_response(&self) -> ErrorResponse {
        let message = match self {
            DomainError::Internal { .. } => "An internal error occurred".to_string(),
            DomainError::Store(StoreError::Backend { .. }) => {
                "Token store is temporarily unavailable".to_string()
            }
            DomainError::Token(TokenError::KeyLoadError { .. }) => {
                "Signing keys are unavailable".to_string()
            }
            other => other.to_string(),
        };
        ErrorResponse::new(self.error_code(), message)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
