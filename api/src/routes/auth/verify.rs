use actix_web::{web, HttpResponse};

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use crate::dto::VerifyResponse;
use crate::extractors::BearerToken;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/verify
///
/// Verifies the access token in the `Authorization: Bearer` header and
/// returns its claims. Does not touch the token store.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "subject": "42",
///     "issued_at": 1700000000,
///     "expires_at": 1700000900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or expired access token
pub async fn verify_token<S, G>(state: web::Data<AppState<S, G>>, token: BearerToken) -> HttpResponse
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    match state.token_service.verify_access(&token.0) {
        Ok(claims) => HttpResponse::Ok().json(VerifyResponse::from(claims)),
        Err(error) => handle_domain_error(error.into()),
    }
}
