use actix_web::{web, HttpResponse};

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use super::AppState;

/// Handler for GET /api/v1/auth/public-key
///
/// Serves the PEM encoded RS256 public key so that other services can
/// verify access tokens on their own.
pub async fn public_key<S, G>(state: web::Data<AppState<S, G>>) -> HttpResponse
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    HttpResponse::Ok()
        .content_type("application/x-pem-file")
        .body(state.token_service.codec().keys().public_key_pem().to_string())
}
