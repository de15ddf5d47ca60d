// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for workerboot.

use thiserror::Error;
use workerboot_store::{DescriptorError, StoreError};

use crate::worker::InstallError;

/// Result type using SetupError.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Store failure normalized to a message and an optional code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    /// Store error code (`conflict`, `bad_request`, ...), when the store sent one.
    pub kind: Option<String>,
    /// Store-reported reason.
    pub message: String,
}

impl From<&StoreError> for RemoteError {
    fn from(err: &StoreError) -> Self {
        Self {
            kind: err.error.clone(),
            message: err.message().to_string(),
        }
    }
}

impl From<StoreError> for RemoteError {
    fn from(err: StoreError) -> Self {
        Self::from(&err)
    }
}

/// Errors that end an installation pass.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Static worker configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Server address or credentials could not produce a connection.
    #[error("connection error: {0}")]
    Connection(#[from] DescriptorError),

    /// Version manifest could not be read.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// The shared `module/appconfig` document could not be read.
    #[error("global config unavailable: {0}")]
    GlobalConfig(RemoteError),

    /// The worker's config document could not be read, for a reason other
    /// than it being absent. Carries the store error unchanged.
    #[error("worker config unavailable: {0}")]
    WorkerConfig(StoreError),

    /// The worker's install step failed during recovery.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// The store refused to create the worker's config document.
    #[error("creating worker config failed [{}]: {}", .0.kind.as_deref().unwrap_or("unknown"), .0.message)]
    CreateConfig(RemoteError),
}

impl SetupError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SetupError::Config(_) => "config",
            SetupError::Connection(_) => "connection",
            SetupError::Manifest(_) => "manifest",
            SetupError::GlobalConfig(_) => "global_config",
            SetupError::WorkerConfig(_) => "worker_config",
            SetupError::Install(_) => "install",
            SetupError::CreateConfig(_) => "create_config",
        }
    }
}
