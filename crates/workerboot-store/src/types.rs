// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Types shared by all store backends.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the store for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    #[serde(default)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

/// One operation seen by a recording backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get {
        collection: String,
        id: String,
    },
    Save {
        collection: String,
        document: serde_json::Value,
    },
}

impl StoreCall {
    /// Collection the call targeted.
    pub fn collection(&self) -> &str {
        match self {
            StoreCall::Get { collection, .. } | StoreCall::Save { collection, .. } => collection,
        }
    }
}
