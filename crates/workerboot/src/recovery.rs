// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recovery from a missing worker config: install, then create the document.
//!
//! A config document is only ever created after the worker's install step
//! has succeeded, so an existing document always means an installed worker.
//! Two workers racing through recovery may both try to create the document;
//! the store's conflict check decides, and the loser gets a `CreateConfig`
//! error. Nothing here retries.

use chrono::Utc;
use tracing::{info, instrument, warn};
use workerboot_store::{RemoteErrorKind, SaveResult, StoreError};

use crate::document::{ConfigDocument, MODULES_COLLECTION};
use crate::error::{RemoteError, Result, SetupError};
use crate::resolver::{ConfigResolver, Installation};
use crate::worker::Worker;

impl<W: Worker> ConfigResolver<W> {
    /// Decide what a failed worker config read means.
    ///
    /// `missing` and `deleted` trigger install followed by document creation.
    /// Anything else is returned unchanged.
    #[instrument(skip(self), fields(worker = %self.context.name()))]
    pub async fn handle_read_worker_config_error(&mut self, err: StoreError) -> Result<Installation> {
        if err.classify() == RemoteErrorKind::Other {
            warn!(reason = err.message(), "Worker config unreadable, not recovering");
            return Err(SetupError::WorkerConfig(err));
        }

        info!(reason = err.message(), "Worker config not found, installing");
        if let Err(install_err) = self.worker.install().await {
            warn!(error = %install_err, "Install failed, config document not created");
            return Err(SetupError::Install(install_err));
        }

        let result = self.create_config_in_modules_database().await?;
        info!(id = %result.id, rev = %result.rev, "Worker config created");
        Ok(Installation::Created(result))
    }

    /// Create `module/<name>` with an empty config and apply it to the context.
    ///
    /// Resolves with the store's save acknowledgement. The context receives
    /// the document as sent, not the acknowledgement.
    #[instrument(skip(self), fields(worker = %self.context.name()))]
    pub async fn create_config_in_modules_database(&mut self) -> Result<SaveResult> {
        let doc = ConfigDocument::new(self.context.name(), Utc::now());
        let body = serde_json::to_value(&doc)
            .map_err(|e| SetupError::CreateConfig(RemoteError::from(StoreError::from(e))))?;

        let saved = self.store().collection(MODULES_COLLECTION).save(&body).await;
        match saved {
            Ok(result) => {
                self.context.set_worker_config(doc);
                Ok(result)
            }
            Err(err) => {
                warn!(
                    kind = err.error.as_deref().unwrap_or("unknown"),
                    reason = err.message(),
                    "Worker config creation rejected"
                );
                Err(SetupError::CreateConfig(RemoteError::from(err)))
            }
        }
    }
}
