// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Config documents as persisted in the `modules` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding every module's config document.
pub const MODULES_COLLECTION: &str = "modules";

/// Id of the shared application config document.
pub const GLOBAL_CONFIG_ID: &str = "module/appconfig";

/// Id of a worker's config document.
pub fn worker_config_id(worker_name: &str) -> String {
    format!("module/{}", worker_name)
}

/// A worker's persisted config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Empty when the store did not echo the id back.
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Set once at creation.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Refreshed on every write.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl ConfigDocument {
    /// Fresh document for a worker with an empty config.
    pub fn new(worker_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: worker_config_id(worker_name),
            rev: None,
            created_at: Some(now),
            updated_at: Some(now),
            config: Map::new(),
        }
    }
}

/// The shared application config document. Only `config` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfigDocument {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub config: Map<String, Value>,
}
