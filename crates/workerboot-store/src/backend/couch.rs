// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CouchDB-compatible HTTP backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::DocumentStore;
use crate::descriptor::{ConnectionDescriptor, Credentials, DescriptorError};
use crate::error::{Result, StoreError};
use crate::types::SaveResult;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Store backed by a CouchDB HTTP endpoint.
///
/// Creating the store opens no socket; connections are made lazily by the
/// underlying client and reused for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct CouchStore {
    client: Client,
    base_url: Url,
    auth: Credentials,
}

impl CouchStore {
    /// Create a store for the given descriptor with the default timeout.
    pub fn connect(descriptor: &ConnectionDescriptor) -> std::result::Result<Self, DescriptorError> {
        Self::with_timeout(descriptor, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a store with an explicit request timeout.
    pub fn with_timeout(
        descriptor: &ConnectionDescriptor,
        timeout: Duration,
    ) -> std::result::Result<Self, DescriptorError> {
        let base_url = descriptor.base_url()?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DescriptorError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            auth: descriptor.auth.clone(),
        })
    }

    /// Root URL requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for `/{collection}` or `/{collection}/{id}`, each a single encoded segment.
    fn document_url(&self, collection: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::transport(format!("cannot-be-a-base url: {}", self.base_url))
            })?;
            segments.pop_if_empty().push(collection);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Response> {
        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.auth.username, Some(&self.auth.password))
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }
}

/// Turn a non-success response into the store's error body.
async fn error_from_response(response: Response) -> StoreError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<StoreError>(&text)
        .ok()
        .filter(|err| err.error.is_some() || err.reason.is_some())
        .unwrap_or_else(|| {
            StoreError::new(
                format!("http_{}", status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            )
        })
}

#[async_trait]
impl DocumentStore for CouchStore {
    #[instrument(skip(self), fields(backend = "couch"))]
    async fn get(&self, collection: &str, id: &str) -> Result<Value> {
        let url = self.document_url(collection, Some(id))?;
        let response = self.send(Method::GET, url, None).await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            debug!(reason = err.message(), "Document fetch failed");
            return Err(err);
        }

        Ok(response.json::<Value>().await?)
    }

    #[instrument(skip(self, document), fields(backend = "couch"))]
    async fn save(&self, collection: &str, document: &Value) -> Result<SaveResult> {
        let id = document.get("_id").and_then(Value::as_str);
        let (method, url) = match id {
            Some(id) => (Method::PUT, self.document_url(collection, Some(id))?),
            None => (Method::POST, self.document_url(collection, None)?),
        };
        let response = self.send(method, url, Some(document)).await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            debug!(reason = err.message(), "Document save failed");
            return Err(err);
        }

        Ok(response.json::<SaveResult>().await?)
    }

    fn backend_type(&self) -> &'static str {
        "couch"
    }
}
