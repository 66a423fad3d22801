use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use crate::dto::RevokeTokenRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/revoke
///
/// Revokes a refresh token. Unknown and already revoked tokens are
/// accepted, so the response is 204 either way.
///
/// ## Errors
/// - 400 Bad Request: Missing refresh token
/// - 503 Service Unavailable: Token store unavailable or timed out
pub async fn revoke_token<S, G>(
    state: web::Data<AppState<S, G>>,
    request: web::Json<RevokeTokenRequest>,
) -> HttpResponse
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.revoke_refresh(&request.refresh_token).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
