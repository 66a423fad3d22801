//! Token route handlers
//!
//! This module contains all token lifecycle endpoints:
//! - Pair issuance for an authenticated subject
//! - Refresh token rotation
//! - Access token verification
//! - Refresh token revocation
//! - Public key export

pub mod issue;
pub mod public_key;
pub mod refresh;
pub mod revoke;
pub mod verify;

use std::sync::Arc;

use auth_core::repositories::TokenStore;
use auth_core::services::token::{RandomRefreshTokenGenerator, RefreshTokenGenerator, TokenLifecycleService};

pub use issue::issue_tokens;
pub use public_key::public_key;
pub use refresh::refresh_tokens;
pub use revoke::revoke_token;
pub use verify::verify_token;

/// Application state that holds shared services
pub struct AppState<S, G = RandomRefreshTokenGenerator>
where
    S: TokenStore,
    G: RefreshTokenGenerator,
{
    pub token_service: Arc<TokenLifecycleService<S, G>>,
}

impl<S, G> AppState<S, G>
where
    S: TokenStore,
    G: RefreshTokenGenerator,
{
    pub fn new(token_service: Arc<TokenLifecycleService<S, G>>) -> Self {
        Self { token_service }
    }
}
