//! Request and response bodies

pub mod auth;
pub mod error;

pub use auth::{
    IssueTokenRequest, RefreshTokenRequest, RevokeTokenRequest, TokenPairResponse, VerifyResponse,
};
pub use error::{ErrorResponse, ErrorResponseExt};
