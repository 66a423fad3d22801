use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use crate::dto::{IssueTokenRequest, TokenPairResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/tokens
///
/// Issues a fresh token pair for a subject the caller has already
/// authenticated. Intended for trusted internal callers.
///
/// # Request Body
///
/// ```json
/// {
///     "subject": "42"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "q2Fz8n1x...",
///     "token_type": "Bearer",
///     "expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or empty subject
/// - 503 Service Unavailable: Token store unavailable
pub async fn issue_tokens<S, G>(
    state: web::Data<AppState<S, G>>,
    request: web::Json<IssueTokenRequest>,
) -> HttpResponse
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.token_service.issue_pair(&request.subject).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
