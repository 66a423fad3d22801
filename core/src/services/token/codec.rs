//! Access token encoding and verification

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, Header, Validation};
use tracing::{debug, error};

use crate::domain::entities::token::AccessTokenClaims;
use crate::errors::TokenError;

use super::key_manager::KeyMaterial;

/// The only algorithm access tokens are signed with or accepted under
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Verifies access tokens with a public key only
///
/// Verification is a pure function of the token, the public key and the
/// clock. Expiry is checked here rather than by `jsonwebtoken` so that an
/// expired but otherwise valid token is reported as `TokenExpired`.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenVerifier {
    pub fn new(decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Builds a verifier from a PEM encoded RSA public key
    pub fn from_public_key_pem(public_key_pem: &str) -> Result<Self, TokenError> {
        let decoding_key =
            DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
                TokenError::KeyLoadError {
                    message: format!("Invalid public key format: {}", e),
                }
            })?;
        Ok(Self::new(decoding_key))
    }

    /// Verifies `token` against the current time
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` as of `now`
    ///
    /// # Returns
    ///
    /// * `Ok(claims)` - Signature, algorithm and structure are valid and `now <= exp`
    /// * `Err(TokenError::TokenExpired)` - Only the expiry check failed
    /// * `Err(TokenError::TokenInvalid)` - Anything else
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessTokenClaims, TokenError> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = %e, "Access token rejected");
                TokenError::TokenInvalid
            })?;

        let claims = data.claims;
        if !claims.is_well_formed() {
            debug!("Access token rejected: malformed claims");
            return Err(TokenError::TokenInvalid);
        }

        if claims.is_expired_at(now) {
            debug!(exp = claims.exp, "Access token expired");
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Signs and verifies access tokens with the process key pair
#[derive(Clone)]
pub struct AccessTokenCodec {
    keys: Arc<KeyMaterial>,
    verifier: AccessTokenVerifier,
}

impl AccessTokenCodec {
    pub fn new(keys: Arc<KeyMaterial>) -> Self {
        let verifier = AccessTokenVerifier::new(keys.decoding_key().clone());
        Self { keys, verifier }
    }

    /// Signs claims `{sub: subject, iat: now, exp: now + lifetime}`
    pub fn sign(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        let claims = AccessTokenClaims::new(subject, now, lifetime).map_err(|e| {
            error!(lifetime_seconds = lifetime.num_seconds(), "Access token expiry overflows");
            e
        })?;

        encode(&Header::new(SIGNING_ALGORITHM), &claims, self.keys.encoding_key()).map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            TokenError::TokenGenerationFailed
        })
    }

    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        self.verifier.verify(token)
    }

    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessTokenClaims, TokenError> {
        self.verifier.verify_at(token, now)
    }

    /// A verifier sharing this codec's public key
    pub fn verifier(&self) -> &AccessTokenVerifier {
        &self.verifier
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }
}
