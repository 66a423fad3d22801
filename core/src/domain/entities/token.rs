//! Token entities for access/refresh credential pairs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::TokenError;

/// Default access token lifetime (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Short, non-reversible identifier for a bearer secret, safe to log.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..4])
}

fn expiry_after(now: DateTime<Utc>, lifetime: Duration) -> Result<DateTime<Utc>, TokenError> {
    now.checked_add_signed(lifetime)
        .ok_or(TokenError::TokenGenerationFailed)
}

/// Claim set carried inside a signed access token
///
/// Claims are never persisted; they exist only inside the signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject the token was issued to
    pub sub: String,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Creates claims for `subject` issued at `now` and valid for `lifetime`
    ///
    /// Fails with `TokenGenerationFailed` when `now + lifetime` is not a
    /// representable instant.
    pub fn new(
        subject: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = expiry_after(now, lifetime)?;
        Ok(Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Subject the token was issued to
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Issue time, if the timestamp is representable
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiry time, if the timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token stays valid up to and including its expiry second
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Checks the structural invariant `exp > iat`
    pub fn is_well_formed(&self) -> bool {
        !self.sub.is_empty() && self.exp > self.iat
    }
}

/// Refresh token record held by the token store
///
/// `id` doubles as the bearer secret handed to the client, so it is kept
/// out of `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Opaque identifier and bearer secret
    pub id: String,

    /// Subject this token was issued to
    pub subject: String,

    /// Fixed at creation, never extended
    pub expires_at: DateTime<Utc>,

    /// Transitions `false -> true` at most once
    pub revoked: bool,
}

impl RefreshTokenRecord {
    /// Creates a fresh, non-revoked record valid for `lifetime` from `now`
    pub fn issue(
        id: impl Into<String>,
        subject: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            id: id.into(),
            subject: subject.into(),
            expires_at: expiry_after(now, lifetime)?,
            revoked: false,
        })
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Usable for a refresh at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired_at(now)
    }

    /// Marks the record revoked, returning whether this call changed it
    pub fn revoke(&mut self) -> bool {
        let transitioned = !self.revoked;
        self.revoked = true;
        transitioned
    }

    /// Loggable identifier for this record
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.id)
    }
}

impl std::fmt::Debug for RefreshTokenRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRecord")
            .field("id", &self.fingerprint())
            .field("subject", &self.subject)
            .field("expires_at", &self.expires_at)
            .field("revoked", &self.revoked)
            .finish()
    }
}

/// Token pair returned to the caller
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_lifetime.num_seconds(),
            refresh_expires_in: refresh_lifetime.num_seconds(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &fingerprint(&self.refresh_token))
            .field("access_expires_in", &self.access_expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let now = Utc::now();
        let claims = AccessTokenClaims::new("42", now, Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES)).unwrap();

        assert_eq!(claims.subject(), "42");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
        assert!(claims.is_well_formed());
        assert!(!claims.is_expired_at(now));
    }

    #[test]
    fn test_claims_expire_after_last_second() {
        let now = Utc::now();
        let claims = AccessTokenClaims::new("42", now, Duration::seconds(60)).unwrap();

        assert!(!claims.is_expired_at(now + Duration::seconds(60)));
        assert!(claims.is_expired_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_claims_timestamps_round_trip() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = AccessTokenClaims::new("42", now, Duration::seconds(120)).unwrap();

        assert_eq!(claims.issued_at(), Some(now));
        assert_eq!(claims.expires_at(), Some(now + Duration::seconds(120)));
    }

    #[test]
    fn test_claims_wire_shape() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = AccessTokenClaims::new("42", now, Duration::seconds(120)).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json, serde_json::json!({"sub": "42", "iat": 1_700_000_000, "exp": 1_700_000_120}));
    }

    #[test]
    fn test_unrepresentable_expiry_is_rejected() {
        let now = Utc::now();
        let lifetime = Duration::seconds(9_000_000_000_000);

        assert_eq!(
            AccessTokenClaims::new("42", now, lifetime),
            Err(TokenError::TokenGenerationFailed)
        );
        assert!(matches!(
            RefreshTokenRecord::issue("secret", "42", now, lifetime),
            Err(TokenError::TokenGenerationFailed)
        ));
    }

    #[test]
    fn test_claims_with_inverted_window_are_malformed() {
        let mut claims = AccessTokenClaims::new("42", Utc::now(), Duration::seconds(60)).unwrap();
        claims.exp = claims.iat;
        assert!(!claims.is_well_formed());
    }

    #[test]
    fn test_refresh_record_issue() {
        let now = Utc::now();
        let record = RefreshTokenRecord::issue("secret", "42", now, Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)).unwrap();

        assert_eq!(record.subject, "42");
        assert_eq!(record.expires_at, now + Duration::days(7));
        assert!(!record.revoked);
        assert!(record.is_active_at(now));
    }

    #[test]
    fn test_refresh_record_revocation_is_monotone() {
        let mut record = RefreshTokenRecord::issue("secret", "42", Utc::now(), Duration::days(1)).unwrap();

        assert!(record.revoke());
        assert!(record.revoked);
        assert!(!record.revoke());
        assert!(record.revoked);
        assert!(!record.is_active_at(Utc::now()));
    }

    #[test]
    fn test_refresh_record_expiry_boundary() {
        let now = Utc::now();
        let record = RefreshTokenRecord::issue("secret", "42", now, Duration::hours(1)).unwrap();

        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
        assert!(!record.is_active_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let record = RefreshTokenRecord::issue("super-secret-value", "42", Utc::now(), Duration::days(1)).unwrap();
        let pair = TokenPair::new(
            "header.payload.signature".to_string(),
            "super-secret-value".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        );

        let record_debug = format!("{:?}", record);
        let pair_debug = format!("{:?}", pair);

        assert!(!record_debug.contains("super-secret-value"));
        assert!(!pair_debug.contains("super-secret-value"));
        assert!(!pair_debug.contains("header.payload.signature"));
        assert!(record_debug.contains(&fingerprint("super-secret-value")));
    }

    #[test]
    fn test_fingerprint_is_short_and_stable() {
        let a = fingerprint("token");
        assert_eq!(a.len(), 8);
        assert_eq!(a, fingerprint("token"));
        assert_ne!(a, fingerprint("other-token"));
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new(
            "access".to_string(),
            "refresh".to_string(),
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        );

        assert_eq!(pair.access_token, "access");
        assert_eq!(pair.refresh_token, "refresh");
        assert_eq!(pair.access_expires_in, 15 * 60);
        assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
    }
}
