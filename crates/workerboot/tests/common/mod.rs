// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared test helpers for workerboot integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use workerboot::store::{ConnectionDescriptor, MemoryStore};
use workerboot::{
    ConfigResolver, ConnectionHandle, GLOBAL_CONFIG_ID, InstallError, MODULES_COLLECTION, Worker,
    WorkerConfig,
};

pub const SERVER: &str = "https://couch.myapp.com:80";

/// Worker double that counts installs and can be told to fail.
pub struct MockWorker {
    name: String,
    install_calls: AtomicUsize,
    install_error: Mutex<Option<InstallError>>,
    /// Store to inspect while installing, to check nothing was saved yet.
    observed_store: Option<MemoryStore>,
    saves_seen_during_install: Mutex<Vec<usize>>,
}

impl MockWorker {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            install_calls: AtomicUsize::new(0),
            install_error: Mutex::new(None),
            observed_store: None,
            saves_seen_during_install: Mutex::new(Vec::new()),
        }
    }

    /// Install fails with the given reason.
    pub fn failing(name: &str, reason: &str) -> Self {
        let worker = Self::new(name);
        *worker.install_error.lock().unwrap() = Some(InstallError::new(reason));
        worker
    }

    /// Record the store's save count each time install runs.
    pub fn observing(mut self, store: &MemoryStore) -> Self {
        self.observed_store = Some(store.clone());
        self
    }

    pub fn install_calls(&self) -> usize {
        self.install_calls.load(Ordering::SeqCst)
    }

    pub fn saves_seen_during_install(&self) -> Vec<usize> {
        self.saves_seen_during_install.lock().unwrap().clone()
    }
}

#[async_trait]
impl Worker for MockWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn install(&self) -> Result<(), InstallError> {
        self.install_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(store) = &self.observed_store {
            let saves = store.save_count().await;
            self.saves_seen_during_install.lock().unwrap().push(saves);
        }
        match self.install_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn worker_config() -> WorkerConfig {
    WorkerConfig::new(SERVER, "admin", "secret")
}

pub fn connection(store: &MemoryStore) -> ConnectionHandle {
    let descriptor = ConnectionDescriptor::parse(SERVER, "admin", "secret").unwrap();
    ConnectionHandle::new(descriptor, Arc::new(store.clone()))
}

pub fn resolver(worker: Arc<MockWorker>, store: &MemoryStore) -> ConfigResolver<MockWorker> {
    ConfigResolver::with_connection(worker, "1.2.3", worker_config(), connection(store))
}

/// Seed `module/appconfig` with the given config map.
pub async fn seed_global(store: &MemoryStore, config: Value) {
    store
        .insert(MODULES_COLLECTION, GLOBAL_CONFIG_ID, json!({ "config": config }))
        .await;
}

/// Seed `module/<name>` with the given config map.
pub async fn seed_worker(store: &MemoryStore, name: &str, config: Value) {
    store
        .insert(
            MODULES_COLLECTION,
            &workerboot::worker_config_id(name),
            json!({ "config": config }),
        )
        .await;
}
