// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Worker version manifest.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SetupError};

/// Static worker metadata, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub version: String,
}

impl Manifest {
    /// Read a JSON manifest such as `{"name": "worker", "version": "1.2.3"}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SetupError::Manifest(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| SetupError::Manifest(format!("{}: {}", path.display(), e)))
    }

    /// Parse manifest JSON.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SetupError::Manifest(e.to_string()))
    }
}
