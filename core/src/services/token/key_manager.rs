//! RS256 key material for access token signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use auth_shared::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::info;

use crate::domain::entities::token::AccessTokenClaims;
use crate::errors::TokenError;

use super::codec::SIGNING_ALGORITHM;

/// Subject used for the load-time consistency probe
const PROBE_SUBJECT: &str = "key-probe";

/// The process-wide signing key pair
///
/// Loaded once at startup and never mutated afterwards; share it as
/// `Arc<KeyMaterial>`. Construction either yields both keys or fails with
/// `KeyLoadError`.
pub struct KeyMaterial {
    /// Private key for signing access tokens
    encoding_key: EncodingKey,
    /// Public key for verifying access tokens
    decoding_key: DecodingKey,
    /// PEM text of the public key, for export to external verifiers
    public_key_pem: String,
    /// Where the key pair came from, `None` for in-memory keys
    source: Option<(PathBuf, PathBuf)>,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (private_key_path, public_key_path) = match &self.source {
            Some((private, public)) => (private.display().to_string(), public.display().to_string()),
            None => ("memory".to_string(), "memory".to_string()),
        };
        f.debug_struct("KeyMaterial")
            .field("algorithm", &SIGNING_ALGORITHM)
            .field("private_key_path", &private_key_path)
            .field("public_key_path", &public_key_path)
            .finish()
    }
}

impl KeyMaterial {
    /// Loads the key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - PKCS#1 or PKCS#8 PEM encoded RSA private key
    /// * `public_key_path` - PEM encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(KeyMaterial)` - Both keys loaded and verified to belong together
    /// * `Err(TokenError::KeyLoadError)` - A file is unreadable, malformed,
    ///   not an RSA key, or the two keys do not form a pair
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, TokenError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read_to_string(&private_key_path).map_err(|e| {
            key_load_error(format!(
                "Failed to read private key {}: {}",
                private_key_path.display(),
                e
            ))
        })?;

        let public_key_pem = fs::read_to_string(&public_key_path).map_err(|e| {
            key_load_error(format!(
                "Failed to read public key {}: {}",
                public_key_path.display(),
                e
            ))
        })?;

        let mut keys = Self::from_pem(&private_key_pem, &public_key_pem)?;
        info!(
            private_key_path = %private_key_path.display(),
            public_key_path = %public_key_path.display(),
            "Loaded RS256 signing keys"
        );
        keys.source = Some((private_key_path, public_key_path));
        Ok(keys)
    }

    /// Loads the key pair from the configured paths
    pub fn from_config(config: &JwtConfig) -> Result<Self, TokenError> {
        Self::from_files(&config.private_key_path, &config.public_key_path)
    }

    /// Loads the key pair from PEM strings (embedded keys, tests)
    pub fn from_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| key_load_error(format!("Invalid private key format: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| key_load_error(format!("Invalid public key format: {}", e)))?;

        let keys = Self {
            encoding_key,
            decoding_key,
            public_key_pem: public_key_pem.trim().to_string(),
            source: None,
        };
        keys.probe()?;
        Ok(keys)
    }

    /// Signs and verifies a throwaway token to prove the two keys form a pair
    fn probe(&self) -> Result<(), TokenError> {
        let claims = AccessTokenClaims::new(PROBE_SUBJECT, Utc::now(), Duration::seconds(60))
            .map_err(|_| key_load_error("Cannot build probe claims"))?;

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| key_load_error(format!("Private key cannot sign: {}", e)))?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;

        decode::<AccessTokenClaims>(&token, &self.decoding_key, &validation)
            .map_err(|_| key_load_error("Public key does not match private key"))?;

        Ok(())
    }

    /// Returns the encoding key for signing access tokens
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying access tokens
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// PEM text of the public key
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }
}

fn key_load_error(message: impl Into<String>) -> TokenError {
    TokenError::KeyLoadError {
        message: message.into(),
    }
}
