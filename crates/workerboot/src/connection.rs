// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Opening the worker's document store connection.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use workerboot_store::{ConnectionDescriptor, CouchStore, DEFAULT_REQUEST_TIMEOUT, DocumentStore};

use crate::error::Result;

/// The worker's store connection, shared for the worker's lifetime.
#[derive(Clone)]
pub struct ConnectionHandle {
    descriptor: ConnectionDescriptor,
    store: Arc<dyn DocumentStore>,
}

impl ConnectionHandle {
    /// Wrap an already opened store.
    pub fn new(descriptor: ConnectionDescriptor, store: Arc<dyn DocumentStore>) -> Self {
        Self { descriptor, store }
    }

    /// Parameters the connection was opened with.
    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    /// The store itself.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("descriptor", &self.descriptor)
            .field("backend", &self.store.backend_type())
            .finish()
    }
}

/// Derive connection parameters from `scheme://host:port` plus admin
/// credentials and open a CouchDB handle.
///
/// A malformed address is an operator error and is returned immediately.
pub fn init_connection(
    server_url: &str,
    admin_user: &str,
    admin_pass: &str,
) -> Result<ConnectionHandle> {
    init_connection_with_timeout(server_url, admin_user, admin_pass, DEFAULT_REQUEST_TIMEOUT)
}

/// [`init_connection`] with an explicit request timeout.
pub fn init_connection_with_timeout(
    server_url: &str,
    admin_user: &str,
    admin_pass: &str,
    timeout: Duration,
) -> Result<ConnectionHandle> {
    let descriptor = ConnectionDescriptor::parse(server_url, admin_user, admin_pass)?;
    let store = CouchStore::with_timeout(&descriptor, timeout)?;

    debug!(
        hostname = %descriptor.hostname,
        port = %descriptor.port,
        user = %descriptor.auth.username,
        "Opened document store connection"
    );

    Ok(ConnectionHandle::new(descriptor, Arc::new(store)))
}
