// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Worker startup entry point.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::config::WorkerConfig;
use crate::connection::ConnectionHandle;
use crate::context::WorkerContext;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::resolver::{ConfigResolver, Installation};
use crate::worker::Worker;

/// A worker whose installation has been assured.
#[derive(Debug, Clone)]
pub struct Installed {
    pub context: WorkerContext,
    pub installation: Installation,
}

impl Installed {
    /// Global settings overlaid with the worker's config.
    pub fn effective_config(&self) -> Map<String, Value> {
        self.context.effective_config()
    }
}

/// Bootstrap a worker: read its version, connect to the store and assure
/// its installation.
///
/// The version comes from the manifest at `config.manifest_path`; the store
/// connection from `config.server` and `config.admin`.
pub async fn setup<W: Worker>(worker: Arc<W>, config: WorkerConfig) -> Result<Installed> {
    let manifest = Manifest::load(&config.manifest_path)?;
    log_start(worker.as_ref(), &manifest);

    let resolver = ConfigResolver::new(worker, manifest.version, config)?;
    run(resolver).await
}

/// [`setup`] over an already opened connection.
pub async fn setup_with_connection<W: Worker>(
    worker: Arc<W>,
    config: WorkerConfig,
    connection: ConnectionHandle,
) -> Result<Installed> {
    let manifest = Manifest::load(&config.manifest_path)?;
    log_start(worker.as_ref(), &manifest);

    let resolver = ConfigResolver::with_connection(worker, manifest.version, config, connection);
    run(resolver).await
}

fn log_start<W: Worker>(worker: &W, manifest: &Manifest) {
    info!(
        worker = worker.name(),
        version = %manifest.version,
        "Assuring worker installation"
    );
}

async fn run<W: Worker>(mut resolver: ConfigResolver<W>) -> Result<Installed> {
    let installation = resolver.assure_installation().await?;
    Ok(Installed {
        context: resolver.into_context(),
        installation,
    })
}
