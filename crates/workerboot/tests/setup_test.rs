// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Tests for worker bootstrap: manifest, connection and the full setup flow.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{MockWorker, connection, seed_global, seed_worker, worker_config};
use serde_json::json;
use tempfile::TempDir;
use workerboot::store::{DescriptorError, MemoryStore};
use workerboot::{SetupError, WorkerConfig, init_connection, setup, setup_with_connection};

fn write_manifest(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn config_with_manifest(path: &Path) -> WorkerConfig {
    worker_config().with_manifest_path(path)
}

// ============================================================================
// init_connection
// ============================================================================

#[test]
fn test_init_connection_derives_descriptor() {
    let handle = init_connection("https://couch.myapp.com:80", "admin", "secret").unwrap();

    let descriptor = handle.descriptor();
    assert_eq!(descriptor.scheme, "https");
    assert_eq!(descriptor.hostname, "couch.myapp.com");
    assert_eq!(descriptor.port, "80");
    assert_eq!(descriptor.auth.username, "admin");
    assert_eq!(descriptor.auth.password, "secret");
    assert_eq!(handle.store().backend_type(), "couch");
}

#[test]
fn test_init_connection_rejects_malformed_address() {
    let err = init_connection("couch.myapp.com:80", "admin", "secret").unwrap_err();

    match err {
        SetupError::Connection(descriptor_err) => assert_eq!(
            descriptor_err,
            DescriptorError::MissingHost("couch.myapp.com:80".to_string())
        ),
        other => panic!("expected connection error, got {:?}", other),
    }
}

#[test]
fn test_connection_debug_hides_password() {
    let handle = init_connection("http://localhost:5984", "admin", "s3cr3t").unwrap();

    let debug = format!("{:?}", handle);
    assert!(debug.contains("couch"));
    assert!(!debug.contains("s3cr3t"));
}

// ============================================================================
// setup_with_connection
// ============================================================================

#[tokio::test]
async fn test_setup_assigns_version_name_and_config() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{ "version" : "1.2.3"}"#);
    let store = MemoryStore::new();
    seed_global(&store, json!({"email": "ops@example.com"})).await;
    seed_worker(&store, "test", json!({})).await;

    let installed = setup_with_connection(
        Arc::new(MockWorker::new("test")),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap();

    let ctx = &installed.context;
    assert_eq!(ctx.name(), "test");
    assert_eq!(ctx.version(), "1.2.3");
    assert_eq!(ctx.config().server, common::SERVER);
    assert_eq!(ctx.connection().descriptor().hostname, "couch.myapp.com");
    assert!(!installed.installation.is_created());
}

#[tokio::test]
async fn test_setup_first_run_installs_once() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{"version": "2.0.0"}"#);
    let store = MemoryStore::new();
    seed_global(&store, json!({})).await;
    let worker = Arc::new(MockWorker::new("orders"));

    let first = setup_with_connection(
        worker.clone(),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap();
    let second = setup_with_connection(
        worker.clone(),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap();

    assert!(first.installation.is_created());
    assert!(!second.installation.is_created());
    assert_eq!(worker.install_calls(), 1);
    assert!(store.document("modules", "module/orders").await.is_some());
}

#[tokio::test]
async fn test_setup_effective_config_prefers_worker_keys() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{"version": "1.0.0"}"#);
    let store = MemoryStore::new();
    seed_global(&store, json!({"region": "eu", "batch": 10})).await;
    seed_worker(&store, "test", json!({"batch": 50})).await;

    let installed = setup_with_connection(
        Arc::new(MockWorker::new("test")),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap();

    let effective = installed.effective_config();
    assert_eq!(effective["region"], "eu");
    assert_eq!(effective["batch"], 50);
}

#[tokio::test]
async fn test_setup_surfaces_install_failure() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{"version": "1.0.0"}"#);
    let store = MemoryStore::new();
    seed_global(&store, json!({})).await;

    let err = setup_with_connection(
        Arc::new(MockWorker::failing("test", "meeeoooouuuuw")),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "install failed: meeeoooouuuuw");
    assert_eq!(store.save_count().await, 0);
}

#[tokio::test]
async fn test_setup_missing_manifest_fails_before_store() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::new();

    let err = setup_with_connection(
        Arc::new(MockWorker::new("test")),
        config_with_manifest(&dir.path().join("absent.json")),
        connection(&store),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SetupError::Manifest(_)));
    assert!(store.calls().await.is_empty());
}

#[tokio::test]
async fn test_setup_malformed_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{"name": "no version"}"#);
    let store = MemoryStore::new();

    let err = setup_with_connection(
        Arc::new(MockWorker::new("test")),
        config_with_manifest(&manifest),
        connection(&store),
    )
    .await
    .unwrap_err();

    match err {
        SetupError::Manifest(msg) => assert!(msg.contains("manifest.json")),
        other => panic!("expected manifest error, got {:?}", other),
    }
}

// ============================================================================
// setup
// ============================================================================

#[tokio::test]
async fn test_setup_rejects_malformed_server_address() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, r#"{"version": "1.0.0"}"#);
    let config =
        WorkerConfig::new("couch.myapp.com:80", "admin", "secret").with_manifest_path(&manifest);

    let err = setup(Arc::new(MockWorker::new("test")), config)
        .await
        .unwrap_err();

    assert!(matches!(err, SetupError::Connection(_)));
}
