//! Domain error to HTTP response mapping

use actix_web::{error::InternalError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use auth_core::errors::{DomainError, StoreError, TokenError};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status for a domain error
///
/// Every token and refresh denial maps to 401 so that clients only learn
/// they must re-authenticate.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(
            TokenError::TokenInvalid
            | TokenError::TokenExpired
            | TokenError::RefreshTokenNotFound
            | TokenError::RefreshTokenRevoked
            | TokenError::RefreshTokenExpired,
        ) => StatusCode::UNAUTHORIZED,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Store(StoreError::Backend { .. } | StoreError::Cancelled) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    if status.is_server_error() {
        tracing::error!(error = %error, code = error.error_code(), "Request failed");
    } else {
        tracing::debug!(error = %error, code = error.error_code(), "Request denied");
    }

    error.to_error_response().to_response(status)
}

/// 400 response listing the failing fields
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new("VALIDATION_ERROR", "Invalid request");

    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field, codes);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}

/// Renders malformed JSON bodies in the standard error shape
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new("INVALID_REQUEST", err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_denials_are_unauthorized() {
        for error in [
            TokenError::TokenInvalid,
            TokenError::TokenExpired,
            TokenError::RefreshTokenNotFound,
            TokenError::RefreshTokenRevoked,
            TokenError::RefreshTokenExpired,
        ] {
            assert_eq!(status_for(&DomainError::Token(error)), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_infrastructure_failures_are_unavailable() {
        assert_eq!(
            status_for(&DomainError::Store(StoreError::Cancelled)),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&DomainError::Store(StoreError::backend("down"))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(
            status_for(&DomainError::Validation {
                message: "subject must not be empty".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Store(StoreError::DuplicateId)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&DomainError::Token(TokenError::TokenGenerationFailed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
