//! Request extractors

use std::future::{ready, Ready};

use actix_web::{
    dev::Payload, error::InternalError, http::header::AUTHORIZATION, http::StatusCode, Error,
    FromRequest, HttpRequest,
};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Access token taken from an `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = extract_bearer_token(req).map(BearerToken).ok_or_else(|| {
            let response = ErrorResponse::new("TOKEN_INVALID", "Missing or invalid Authorization header")
                .to_response(StatusCode::UNAUTHORIZED);
            InternalError::from_response("missing bearer token", response).into()
        });

        ready(result)
    }
}

fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_missing = TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_missing), None);
    }
}
