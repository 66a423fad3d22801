use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use crate::dto::{RefreshTokenRequest, TokenPairResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented refresh token
/// is revoked; presenting it again fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, revoked or expired refresh token
/// - 503 Service Unavailable: Token store unavailable or timed out
pub async fn refresh_tokens<S, G>(
    state: web::Data<AppState<S, G>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.refresh_pair(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
