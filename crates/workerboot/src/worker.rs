// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The worker collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a worker's own install step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("install failed: {reason}")]
pub struct InstallError {
    pub reason: String,
}

impl InstallError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A worker whose configuration is bootstrapped from the document store.
///
/// Only what installation assurance needs: the worker's name (which keys its
/// config document as `module/<name>`) and its install procedure.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Worker name.
    fn name(&self) -> &str;

    /// Provision whatever the worker needs before its config document exists.
    ///
    /// Called at most once per installation pass, and only when the worker's
    /// config document is missing or deleted.
    async fn install(&self) -> Result<(), InstallError>;
}
