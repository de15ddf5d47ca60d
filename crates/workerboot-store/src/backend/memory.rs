// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-memory document store.
//!
//! Behaves like a single CouchDB node closely enough for tests and local
//! runs: revisions are tracked, saving over a document without its current
//! `_rev` is a conflict, and removed documents report `deleted` instead of
//! `missing`. Failures can be injected per operation and every call is
//! journaled so tests can assert on what was asked of the store.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::DocumentStore;
use crate::error::{Result, StoreError};
use crate::types::{SaveResult, StoreCall};

/// Stored revision of one document.
#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    rev: String,
    /// `None` once the document has been deleted.
    body: Option<Value>,
}

#[derive(Debug, Default)]
struct State {
    documents: HashMap<(String, String), Entry>,
    /// Pending get failures, optionally targeted at one `(collection, id)`.
    get_faults: VecDeque<(Option<(String, String)>, StoreError)>,
    save_faults: VecDeque<StoreError>,
    calls: Vec<StoreCall>,
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, returning its new revision.
    pub async fn insert(&self, collection: &str, id: &str, mut body: Value) -> String {
        let mut state = self.state.lock().await;
        let key = (collection.to_string(), id.to_string());
        let generation = state.documents.get(&key).map_or(0, |e| e.generation) + 1;
        let rev = new_rev(generation);
        if let Value::Object(map) = &mut body {
            map.insert("_id".to_string(), Value::String(id.to_string()));
            map.insert("_rev".to_string(), Value::String(rev.clone()));
        }
        state.documents.insert(
            key,
            Entry {
                generation,
                rev: rev.clone(),
                body: Some(body),
            },
        );
        rev
    }

    /// Delete a document, leaving a tombstone. Returns false if it was not there.
    pub async fn delete(&self, collection: &str, id: &str) -> bool {
        let mut state = self.state.lock().await;
        let key = (collection.to_string(), id.to_string());
        match state.documents.get_mut(&key) {
            Some(entry) if entry.body.is_some() => {
                entry.generation += 1;
                entry.rev = new_rev(entry.generation);
                entry.body = None;
                true
            }
            _ => false,
        }
    }

    /// Current body of a document, bypassing fault injection and the journal.
    pub async fn document(&self, collection: &str, id: &str) -> Option<Value> {
        let state = self.state.lock().await;
        state
            .documents
            .get(&(collection.to_string(), id.to_string()))
            .and_then(|entry| entry.body.clone())
    }

    /// Make the next `get` fail with `error`. Faults queue up in order.
    pub async fn fail_next_get(&self, error: StoreError) {
        self.state.lock().await.get_faults.push_back((None, error));
    }

    /// Make the next `get` of one document fail with `error`.
    pub async fn fail_next_get_of(&self, collection: &str, id: &str, error: StoreError) {
        let target = Some((collection.to_string(), id.to_string()));
        self.state.lock().await.get_faults.push_back((target, error));
    }

    /// Make the next `save` fail with `error`. Faults queue up in order.
    pub async fn fail_next_save(&self, error: StoreError) {
        self.state.lock().await.save_faults.push_back(error);
    }

    /// Every call made so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of `save` calls made so far.
    pub async fn save_count(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| matches!(call, StoreCall::Save { .. }))
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Value> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Get {
            collection: collection.to_string(),
            id: id.to_string(),
        });

        let key = (collection.to_string(), id.to_string());
        let fault = state
            .get_faults
            .iter()
            .position(|(target, _)| target.as_ref().is_none_or(|t| *t == key))
            .and_then(|pos| state.get_faults.remove(pos));
        if let Some((_, fault)) = fault {
            debug!(collection, id, reason = fault.message(), "Injected get failure");
            return Err(fault);
        }

        match state.documents.get(&key) {
            Some(Entry {
                body: Some(body), ..
            }) => Ok(body.clone()),
            Some(Entry { body: None, .. }) => Err(StoreError::not_found("deleted")),
            None => Err(StoreError::not_found("missing")),
        }
    }

    async fn save(&self, collection: &str, document: &Value) -> Result<SaveResult> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Save {
            collection: collection.to_string(),
            document: document.clone(),
        });

        if let Some(fault) = state.save_faults.pop_front() {
            debug!(collection, reason = fault.message(), "Injected save failure");
            return Err(fault);
        }

        let Value::Object(fields) = document else {
            return Err(StoreError::new(
                "bad_request",
                "Document must be a JSON object.",
            ));
        };

        let id = match fields.get("_id") {
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(StoreError::new("bad_request", "Document id must be a string."));
            }
            None => uuid::Uuid::new_v4().simple().to_string(),
        };
        let supplied_rev = fields.get("_rev").and_then(Value::as_str);

        let key = (collection.to_string(), id.clone());
        let generation = match state.documents.get(&key) {
            // Live document: the caller must hold the current revision
            Some(entry) if entry.body.is_some() => {
                if supplied_rev != Some(entry.rev.as_str()) {
                    return Err(StoreError::conflict());
                }
                entry.generation + 1
            }
            // Tombstone: recreation continues the revision history
            Some(entry) => entry.generation + 1,
            None => 1,
        };

        let rev = new_rev(generation);
        let mut body = fields.clone();
        body.insert("_id".to_string(), Value::String(id.clone()));
        body.insert("_rev".to_string(), Value::String(rev.clone()));
        state.documents.insert(
            key,
            Entry {
                generation,
                rev: rev.clone(),
                body: Some(Value::Object(body)),
            },
        );

        Ok(SaveResult { ok: true, id, rev })
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}

fn new_rev(generation: u64) -> String {
    format!("{}-{}", generation, uuid::Uuid::new_v4().simple())
}
