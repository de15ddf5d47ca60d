// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for workerboot-store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a document store uses to say a document is not there.
const NOT_FOUND_REASONS: [&str; 2] = ["missing", "deleted"];

/// Result type using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Raw error reported by the document store.
///
/// Mirrors the CouchDB error body `{"error": "...", "reason": "..."}`. Both
/// fields are optional because transports and proxies do not always send
/// them, and callers must be able to classify whatever came back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}", self.message())]
pub struct StoreError {
    /// Error code, e.g. `not_found`, `conflict`, `bad_request`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable reason, e.g. `missing`, `deleted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The document does not exist (`missing`) or was removed (`deleted`).
    NotFound,
    /// Anything else.
    Other,
}

impl StoreError {
    /// Create an error with both a code and a reason.
    pub fn new(error: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            reason: Some(reason.into()),
        }
    }

    /// Create an error carrying only a reason.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            error: None,
            reason: Some(reason.into()),
        }
    }

    /// `not_found` error with the given reason (`missing` or `deleted`).
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new("not_found", reason)
    }

    /// Revision conflict on save.
    pub fn conflict() -> Self {
        Self::new("conflict", "Document update conflict.")
    }

    /// Network or client failure before the store answered.
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::new("transport", reason)
    }

    /// Classify this error by its reason.
    pub fn classify(&self) -> RemoteErrorKind {
        match self.reason.as_deref() {
            Some(reason) if NOT_FOUND_REASONS.contains(&reason) => RemoteErrorKind::NotFound,
            _ => RemoteErrorKind::Other,
        }
    }

    /// Whether the document is absent (missing or deleted).
    pub fn is_not_found(&self) -> bool {
        self.classify() == RemoteErrorKind::NotFound
    }

    /// The store-reported reason, falling back to the code.
    pub fn message(&self) -> &str {
        self.reason
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("unknown document store error")
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new("bad_document", err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::transport(err.to_string())
    }
}
