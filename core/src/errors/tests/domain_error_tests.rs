//! Unit tests for domain error types

use crate::errors::{DomainError, StoreError, TokenError};

#[test]
fn test_token_error_codes() {
    assert_eq!(TokenError::TokenExpired.error_code(), "TOKEN_EXPIRED");
    assert_eq!(TokenError::TokenInvalid.error_code(), "TOKEN_INVALID");
    assert_eq!(TokenError::RefreshTokenRevoked.error_code(), "REFRESH_TOKEN_REVOKED");
}

#[test]
fn test_conversion_keeps_kind_distinguishable() {
    let expired: DomainError = TokenError::TokenExpired.into();
    let invalid: DomainError = TokenError::TokenInvalid.into();

    assert_ne!(expired, invalid);
    assert_eq!(expired.error_code(), "TOKEN_EXPIRED");
    assert_eq!(invalid.error_code(), "TOKEN_INVALID");
}

#[test]
fn test_store_failures_are_retryable() {
    assert!(DomainError::from(StoreError::Cancelled).is_retryable());
    assert!(DomainError::from(StoreError::backend("connection reset")).is_retryable());
    assert!(!DomainError::from(StoreError::DuplicateId).is_retryable());
    assert!(!DomainError::from(TokenError::RefreshTokenRevoked).is_retryable());
}

#[test]
fn test_refresh_denials_require_reauthentication() {
    assert!(TokenError::RefreshTokenNotFound.requires_reauthentication());
    assert!(TokenError::RefreshTokenRevoked.requires_reauthentication());
    assert!(TokenError::RefreshTokenExpired.requires_reauthentication());
    assert!(!TokenError::TokenGenerationFailed.requires_reauthentication());
}

#[test]
fn test_error_response_hides_backend_details() {
    let error = DomainError::from(StoreError::backend("password=hunter2 host=db"));
    let response = error.to_error_response();

    assert_eq!(response.error, "STORE_ERROR");
    assert!(!response.message.contains("hunter2"));
}

#[test]
fn test_error_response_for_client_errors() {
    let response = DomainError::from(TokenError::RefreshTokenExpired).to_error_response();
    assert_eq!(response.error, "REFRESH_TOKEN_EXPIRED");
    assert_eq!(response.message, "Refresh token expired");
}
