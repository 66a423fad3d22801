//! Token lifetime and signing key configuration

use serde::{Deserialize, Serialize};

/// Default access token lifetime in seconds (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;

/// Default refresh token lifetime in seconds (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;

/// Longest accepted lifetime for either token, in seconds (10 years)
pub const MAX_TOKEN_EXPIRY: i64 = 315_360_000;

/// JWT configuration: lifetimes and the location of the RSA key pair
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Path to the PEM-encoded RSA private key
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key
    pub public_key_path: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            private_key_path: String::from("keys/private.pem"),
            public_key_path: String::from("keys/public.pem"),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_expiry);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_expiry);

        Self {
            access_token_expiry,
            refresh_token_expiry,
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.private_key_path),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.public_key_path),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set the key pair locations
    pub fn with_key_paths(
        mut self,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.private_key_path = private_key_path.into();
        self.public_key_path = public_key_path.into();
        self
    }

    /// Check lifetimes for consistency
    ///
    /// Both lifetimes must be positive and an access token must expire
    /// strictly before the refresh token that accompanies it.
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token_expiry <= 0 {
            return Err(format!(
                "access_token_expiry must be positive, got {}",
                self.access_token_expiry
            ));
        }
        if self.refresh_token_expiry <= 0 {
            return Err(format!(
                "refresh_token_expiry must be positive, got {}",
                self.refresh_token_expiry
            ));
        }
        if self.refresh_token_expiry > MAX_TOKEN_EXPIRY {
            return Err(format!(
                "refresh_token_expiry must not exceed {}s, got {}",
                MAX_TOKEN_EXPIRY, self.refresh_token_expiry
            ));
        }
        if self.access_token_expiry >= self.refresh_token_expiry {
            return Err(format!(
                "access_token_expiry ({}s) must be shorter than refresh_token_expiry ({}s)",
                self.access_token_expiry, self.refresh_token_expiry
            ));
        }
        if self.private_key_path.is_empty() || self.public_key_path.is_empty() {
            return Err("private_key_path and public_key_path must be set".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builders() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_days(1)
            .with_key_paths("a.pem", "b.pem");

        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 86400);
        assert_eq!(config.private_key_path, "a.pem");
        assert_eq!(config.public_key_path, "b.pem");
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetimes() {
        let mut config = JwtConfig::default();
        config.access_token_expiry = 0;
        assert!(config.validate().is_err());

        let mut config = JwtConfig::default();
        config.refresh_token_expiry = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_lifetimes() {
        let mut config = JwtConfig::default();
        config.refresh_token_expiry = 9_000_000_000_000;
        assert!(config.validate().is_err());

        config.refresh_token_expiry = MAX_TOKEN_EXPIRY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_access_longer_than_refresh() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(120)
            .with_refresh_expiry_days(0);
        assert!(config.validate().is_err());

        let mut config = JwtConfig::default();
        config.access_token_expiry = config.refresh_token_expiry;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_key_paths() {
        let config = JwtConfig::default().with_key_paths("", "public.pem");
        assert!(config.validate().is_err());
    }
}
