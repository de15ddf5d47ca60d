// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-worker runtime state threaded through an installation pass.

use serde_json::{Map, Value};

use crate::config::WorkerConfig;
use crate::connection::ConnectionHandle;
use crate::document::{ConfigDocument, GlobalConfigDocument};

/// Everything installation assurance knows about one worker.
///
/// Created once at startup. The global and worker config slots are filled
/// as the corresponding documents are read or created.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    name: String,
    version: String,
    config: WorkerConfig,
    connection: ConnectionHandle,
    global_config: Option<GlobalConfigDocument>,
    worker_config: Option<ConfigDocument>,
}

impl WorkerContext {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        config: WorkerConfig,
        connection: ConnectionHandle,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            config,
            connection,
            global_config: None,
            worker_config: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn connection(&self) -> &ConnectionHandle {
        &self.connection
    }

    /// Shared settings, once `module/appconfig` has been read.
    pub fn global_config(&self) -> Option<&GlobalConfigDocument> {
        self.global_config.as_ref()
    }

    /// The worker's config document, once read or created.
    pub fn worker_config(&self) -> Option<&ConfigDocument> {
        self.worker_config.as_ref()
    }

    pub fn set_global_config(&mut self, doc: GlobalConfigDocument) {
        self.global_config = Some(doc);
    }

    pub fn set_worker_config(&mut self, doc: ConfigDocument) {
        self.worker_config = Some(doc);
    }

    /// Global settings overlaid with the worker's own; worker keys win.
    pub fn effective_config(&self) -> Map<String, Value> {
        let mut merged = self
            .global_config
            .as_ref()
            .map(|doc| doc.config.clone())
            .unwrap_or_default();
        if let Some(doc) = &self.worker_config {
            merged.extend(doc.config.clone());
        }
        merged
    }
}
