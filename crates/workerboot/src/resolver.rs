// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Config resolution: global config, then worker config, then recovery.
//!
//! One pass runs strictly in sequence:
//!
//! ```text
//! read_global_config ──err──▶ handle_error ──▶ Err
//!        │ ok
//!        ▼
//! read_user_config ──ok──▶ Installation::Existing
//!        │ err (raw store error)
//!        ▼
//! handle_read_worker_config_error (see recovery.rs)
//! ```
//!
//! Global config failures never lead to recovery, whatever their reason:
//! a missing shared document says nothing about whether this worker was
//! provisioned.

use std::sync::Arc;

use tracing::{debug, error, instrument};
use workerboot_store::{DocumentStore, SaveResult, StoreError};

use crate::config::WorkerConfig;
use crate::connection::{ConnectionHandle, init_connection_with_timeout};
use crate::context::WorkerContext;
use crate::document::{
    ConfigDocument, GLOBAL_CONFIG_ID, GlobalConfigDocument, MODULES_COLLECTION, worker_config_id,
};
use crate::error::{RemoteError, Result, SetupError};
use crate::worker::Worker;

/// Outcome of a successful installation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Installation {
    /// The worker's config document already existed.
    Existing(ConfigDocument),
    /// The worker was installed and its config document created.
    Created(SaveResult),
}

impl Installation {
    /// Whether this pass created the config document.
    pub fn is_created(&self) -> bool {
        matches!(self, Installation::Created(_))
    }
}

/// Resolves a worker's configuration against the document store.
pub struct ConfigResolver<W: Worker> {
    pub(crate) worker: Arc<W>,
    pub(crate) context: WorkerContext,
}

impl<W: Worker> ConfigResolver<W> {
    /// Create a resolver, opening the store connection from `config`.
    pub fn new(worker: Arc<W>, version: impl Into<String>, config: WorkerConfig) -> Result<Self> {
        let connection = init_connection_with_timeout(
            &config.server,
            &config.admin.user,
            &config.admin.pass,
            config.request_timeout,
        )?;
        Ok(Self::with_connection(worker, version, config, connection))
    }

    /// Create a resolver over an already opened connection.
    pub fn with_connection(
        worker: Arc<W>,
        version: impl Into<String>,
        config: WorkerConfig,
        connection: ConnectionHandle,
    ) -> Self {
        let context = WorkerContext::new(worker.name(), version, config, connection);
        Self { worker, context }
    }

    pub fn worker(&self) -> &W {
        &self.worker
    }

    pub fn context(&self) -> &WorkerContext {
        &self.context
    }

    pub fn into_context(self) -> WorkerContext {
        self.context
    }

    pub(crate) fn store(&self) -> &dyn DocumentStore {
        self.context.connection().store()
    }

    /// Make sure the worker's config exists, installing the worker if not.
    #[instrument(skip(self), fields(worker = %self.context.name()))]
    pub async fn assure_installation(&mut self) -> Result<Installation> {
        if let Err(err) = self.read_global_config().await {
            return self.handle_error(err);
        }

        match self.read_user_config().await {
            Ok(doc) => {
                debug!("Worker config found");
                Ok(Installation::Existing(doc))
            }
            Err(err) => self.handle_read_worker_config_error(err).await,
        }
    }

    /// Read `module/appconfig` and apply it to the context.
    #[instrument(skip(self), fields(worker = %self.context.name()))]
    pub async fn read_global_config(&mut self) -> Result<()> {
        let raw = self
            .store()
            .collection(MODULES_COLLECTION)
            .get(GLOBAL_CONFIG_ID)
            .await
            .map_err(|e| SetupError::GlobalConfig(RemoteError::from(e)))?;

        let doc: GlobalConfigDocument = serde_json::from_value(raw)
            .map_err(|e| SetupError::GlobalConfig(RemoteError::from(StoreError::from(e))))?;

        self.context.set_global_config(doc);
        Ok(())
    }

    /// Read `module/<name>` and apply it to the context.
    ///
    /// Failures are returned as the raw store error so the caller can look
    /// at its reason. A document that does not decode is a `bad_document`
    /// error, which is never treated as absent.
    #[instrument(skip(self), fields(worker = %self.context.name()))]
    pub async fn read_user_config(&mut self) -> std::result::Result<ConfigDocument, StoreError> {
        let id = worker_config_id(self.context.name());
        let raw = self.store().collection(MODULES_COLLECTION).get(&id).await?;
        let mut doc: ConfigDocument = serde_json::from_value(raw)?;
        if doc.id.is_empty() {
            doc.id = id;
        }

        self.context.set_worker_config(doc.clone());
        Ok(doc)
    }

    /// Terminal handler for errors that are not eligible for recovery.
    pub fn handle_error<T>(&self, err: SetupError) -> Result<T> {
        error!(
            worker = %self.context.name(),
            kind = err.kind(),
            error = %err,
            "Installation assurance failed"
        );
        Err(err)
    }
}
