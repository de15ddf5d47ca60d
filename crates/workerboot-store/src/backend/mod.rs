// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document store backends.
//!
//! This module provides different backends behind one trait:
//! - `couch`: CouchDB-compatible HTTP API (default)
//! - `memory`: in-process documents for tests and local runs

#[cfg(feature = "http")]
pub mod couch;

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::SaveResult;

/// Backend trait for document store operations.
///
/// Documents are JSON objects addressed by `_id` inside a named collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Value>;

    /// Create or update a document. The document's `_id` (if any) is its key.
    async fn save(&self, collection: &str, document: &Value) -> Result<SaveResult>;

    /// Short backend name for logs.
    fn backend_type(&self) -> &'static str;
}

/// A named collection on a store.
pub struct Collection<'a> {
    store: &'a dyn DocumentStore,
    name: &'a str,
}

impl<'a> Collection<'a> {
    /// Fetch a document from this collection.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.store.get(self.name, id).await
    }

    /// Save a document into this collection.
    pub async fn save(&self, document: &Value) -> Result<SaveResult> {
        self.store.save(self.name, document).await
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        self.name
    }
}

impl dyn DocumentStore + '_ {
    /// Borrow a collection view, e.g. `store.collection("modules").get(id)`.
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a> {
        Collection { store: self, name }
    }
}
