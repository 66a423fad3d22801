//! Tests for the expiry sweep service

use std::sync::Arc;

use auth_shared::CleanupConfig;
use chrono::{Duration, Utc};

use super::fixtures::*;
use crate::domain::entities::token::RefreshTokenRecord;
use crate::repositories::TokenStore;
use crate::services::token::{TokenCleanupService, TokenLifecycleService, TokenServiceConfig};

async fn seed_expired(store: &impl TokenStore, id: &str) {
    store
        .create(RefreshTokenRecord::issue(id, "42", Utc::now() - Duration::days(8), Duration::days(7)).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_run_cleanup_deletes_expired() {
    let (store, service) = service();
    seed_expired(store.as_ref(), "a").await;
    seed_expired(store.as_ref(), "b").await;
    service.issue_pair("42").await.unwrap();

    let cleanup = TokenCleanupService::new(Arc::new(service), CleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.expired_tokens_deleted, 2);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_disabled_cleanup_does_nothing() {
    let (store, service) = service();
    seed_expired(store.as_ref(), "a").await;

    let config = CleanupConfig {
        enabled: false,
        ..CleanupConfig::default()
    };
    let cleanup = Arc::new(TokenCleanupService::new(Arc::new(service), config));

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 0);
    assert_eq!(store.len().await, 1);
    assert!(cleanup.start_background_task().is_none());
}

#[tokio::test]
async fn test_store_failure_is_recorded() {
    let store = Arc::new(FlakyStore::new());
    store.set_fail_writes(true);
    let service = TokenLifecycleService::new(store, keys(), TokenServiceConfig::default());

    let cleanup = TokenCleanupService::new(Arc::new(service), CleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let (store, service) = service();
    let config = CleanupConfig {
        enabled: true,
        interval_seconds: 60,
    };
    let cleanup = Arc::new(TokenCleanupService::new(Arc::new(service), config));

    let handle = cleanup.start_background_task().unwrap();
    // first tick fires immediately
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    seed_expired(store.as_ref(), "late").await;
    assert_eq!(store.len().await, 1);

    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert!(store.is_empty().await);

    handle.abort();
}
