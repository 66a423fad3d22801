//! Tests for RS256 key material loading

use std::path::PathBuf;

use auth_shared::JwtConfig;

use super::fixtures::*;
use crate::errors::TokenError;
use crate::services::token::KeyMaterial;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/keys")
        .join(name)
}

fn is_key_load_error(result: Result<KeyMaterial, TokenError>) -> bool {
    matches!(result, Err(TokenError::KeyLoadError { .. }))
}

#[test]
fn test_load_from_pem_strings() {
    let keys = KeyMaterial::from_pem(PRIVATE_KEY, PUBLIC_KEY).unwrap();
    assert_eq!(keys.public_key_pem(), PUBLIC_KEY.trim());
}

#[test]
fn test_load_from_files() {
    let keys = KeyMaterial::from_files(fixture_path("private.pem"), fixture_path("public.pem")).unwrap();

    let debug = format!("{:?}", keys);
    assert!(debug.contains("private.pem"));
    assert!(!debug.contains("BEGIN"));
}

#[test]
fn test_load_from_config() {
    let config = JwtConfig::default().with_key_paths(
        fixture_path("private.pem").to_string_lossy(),
        fixture_path("public.pem").to_string_lossy(),
    );

    assert!(KeyMaterial::from_config(&config).is_ok());
}

#[test]
fn test_missing_file_fails() {
    let result = KeyMaterial::from_files(fixture_path("absent.pem"), fixture_path("public.pem"));
    assert!(is_key_load_error(result));
}

#[test]
fn test_malformed_pem_fails() {
    assert!(is_key_load_error(KeyMaterial::from_pem("not a key", PUBLIC_KEY)));
    assert!(is_key_load_error(KeyMaterial::from_pem(PRIVATE_KEY, "not a key")));
}

#[test]
fn test_non_rsa_keys_fail() {
    assert!(is_key_load_error(KeyMaterial::from_pem(EC_PRIVATE_KEY, PUBLIC_KEY)));
    assert!(is_key_load_error(KeyMaterial::from_pem(PRIVATE_KEY, EC_PUBLIC_KEY)));
}

#[test]
fn test_mismatched_pair_fails() {
    assert!(is_key_load_error(KeyMaterial::from_pem(PRIVATE_KEY, OTHER_PUBLIC_KEY)));
    assert!(is_key_load_error(KeyMaterial::from_pem(OTHER_PRIVATE_KEY, PUBLIC_KEY)));
}
