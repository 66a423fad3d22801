//! Refresh token identifier generation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

/// Bytes of entropy in a generated refresh token id
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Produces opaque refresh token identifiers
///
/// The identifier is both the bearer secret handed to the client and the
/// store lookup key, so it must come from a cryptographically secure source.
pub trait RefreshTokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generator backed by the operating system RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRefreshTokenGenerator;

impl RefreshTokenGenerator for RandomRefreshTokenGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_url_safe() {
        let id = RandomRefreshTokenGenerator.generate();

        // 32 bytes, unpadded base64
        assert_eq!(id.len(), 43);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generated_ids_do_not_repeat() {
        let generator = RandomRefreshTokenGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
