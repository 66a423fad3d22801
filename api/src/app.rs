//! Application factory
//!
//! Builds the actix-web application around a shared `AppState`.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use auth_core::repositories::TokenStore;
use auth_core::services::token::RefreshTokenGenerator;

use crate::handlers::json_error_handler;
use crate::routes::auth::{
    issue_tokens, public_key, refresh_tokens, revoke_token, verify_token, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<S, G>(
    app_state: web::Data<AppState<S, G>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: TokenStore + 'static,
    G: RefreshTokenGenerator + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/tokens", web::post().to(issue_tokens::<S, G>))
                    .route("/refresh", web::post().to(refresh_tokens::<S, G>))
                    .route("/verify", web::post().to(verify_token::<S, G>))
                    .route("/revoke", web::post().to(revoke_token::<S, G>))
                    .route("/public-key", web::get().to(public_key::<S, G>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "auth-token-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
