// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workerboot - installation assurance for workers.
//!
//! Every time a worker starts, its configuration is resolved from a shared
//! document store. On first run the worker's config document does not exist
//! yet: the worker is installed and the document is created. On every later
//! run the document is simply read. Any other failure is surfaced to the
//! caller without touching shared state.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use workerboot::{InstallError, Worker, WorkerConfig, setup};
//!
//! struct EmailWorker;
//!
//! #[async_trait::async_trait]
//! impl Worker for EmailWorker {
//!     fn name(&self) -> &str {
//!         "email"
//!     }
//!
//!     async fn install(&self) -> Result<(), InstallError> {
//!         // create databases, design docs, ...
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> workerboot::Result<()> {
//!     let config = WorkerConfig::from_env()?;
//!     let installed = setup(Arc::new(EmailWorker), config).await?;
//!     println!("{:?}", installed.effective_config());
//!     Ok(())
//! }
//! ```
//!
//! # Documents
//!
//! | Document | Collection | Role |
//! |----------|------------|------|
//! | `module/appconfig` | `modules` | Shared settings, read only |
//! | `module/<worker>` | `modules` | Worker settings, created on first run |
//!
//! # Configuration
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `WORKERBOOT_SERVER` | Yes | - | Store address, `scheme://host:port` |
//! | `WORKERBOOT_ADMIN_USER` | Yes | - | Store admin user |
//! | `WORKERBOOT_ADMIN_PASS` | Yes | - | Store admin password |
//! | `WORKERBOOT_MANIFEST` | No | `manifest.json` | Version manifest |
//! | `WORKERBOOT_REQUEST_TIMEOUT_MS` | No | `30000` | Store request timeout |

mod config;
mod connection;
mod context;
mod document;
mod error;
mod manifest;
mod recovery;
mod resolver;
mod setup;
mod worker;

pub use config::{AdminCredentials, WorkerConfig};
pub use connection::{ConnectionHandle, init_connection, init_connection_with_timeout};
pub use context::WorkerContext;
pub use document::{
    ConfigDocument, GLOBAL_CONFIG_ID, GlobalConfigDocument, MODULES_COLLECTION, worker_config_id,
};
pub use error::{RemoteError, Result, SetupError};
pub use manifest::Manifest;
pub use resolver::{ConfigResolver, Installation};
pub use setup::{Installed, setup, setup_with_connection};
pub use worker::{InstallError, Worker};

// Re-export the store crate for backends and error types
pub use workerboot_store as store;
