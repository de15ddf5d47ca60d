// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workerboot Store - document store contract used by worker bootstrap.
//!
//! Workers keep their configuration as JSON documents in a shared store.
//! This crate defines the small contract the bootstrap needs from that store
//! (get by id, save by id, CouchDB-shaped errors) and ships two backends:
//!
//! - [`CouchStore`] talks to a CouchDB-compatible HTTP API (feature `http`,
//!   on by default).
//! - [`MemoryStore`] keeps documents in process, with fault injection and a
//!   call journal for tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use workerboot_store::{ConnectionDescriptor, CouchStore, DocumentStore};
//!
//! let descriptor = ConnectionDescriptor::parse("https://couch.example.com:6984", "admin", "secret")?;
//! let store: Arc<dyn DocumentStore> = Arc::new(CouchStore::connect(&descriptor)?);
//!
//! match store.collection("modules").get("module/appconfig").await {
//!     Ok(doc) => println!("{}", doc),
//!     Err(err) if err.is_not_found() => println!("no app config yet"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod backend;
mod descriptor;
mod error;
mod types;

pub use backend::memory::MemoryStore;
pub use backend::{Collection, DocumentStore};
pub use descriptor::{ConnectionDescriptor, Credentials, DescriptorError};
pub use error::{RemoteErrorKind, Result, StoreError};
pub use types::{SaveResult, StoreCall};

#[cfg(feature = "http")]
pub use backend::couch::{CouchStore, DEFAULT_REQUEST_TIMEOUT};
