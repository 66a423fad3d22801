//! Shared setup for HTTP tests

use std::sync::Arc;

use actix_web::web;

use auth_api::routes::auth::AppState;
use auth_core::{InMemoryTokenStore, KeyMaterial, TokenLifecycleService, TokenServiceConfig, TokenStore};

pub const PRIVATE_KEY: &str = include_str!("../../../core/tests/fixtures/keys/private.pem");
pub const PUBLIC_KEY: &str = include_str!("../../../core/tests/fixtures/keys/public.pem");

pub fn keys() -> Arc<KeyMaterial> {
    Arc::new(KeyMaterial::from_pem(PRIVATE_KEY, PUBLIC_KEY).unwrap())
}

pub fn state_with<S: TokenStore + 'static>(store: Arc<S>) -> web::Data<AppState<S>> {
    let service = TokenLifecycleService::new(store, keys(), TokenServiceConfig::default());
    web::Data::new(AppState::new(Arc::new(service)))
}

pub fn state() -> (Arc<InMemoryTokenStore>, web::Data<AppState<InMemoryTokenStore>>) {
    let store = Arc::new(InMemoryTokenStore::new());
    (store.clone(), state_with(store))
}
