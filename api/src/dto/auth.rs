use serde::{Deserialize, Serialize};
use validator::Validate;

use auth_core::domain::entities::token::{AccessTokenClaims, TokenPair};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueTokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub refresh_token: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RevokeTokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub refresh_token: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub subject: String,
    /// Seconds since epoch
    pub issued_at: i64,
    /// Seconds since epoch
    pub expires_at: i64,
}

impl From<AccessTokenClaims> for VerifyResponse {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
