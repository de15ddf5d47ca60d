// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Connection parameters derived from a server URL and admin credentials.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Errors raised while deriving a [`ConnectionDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The server address is not a URL.
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL has no host in its authority.
    #[error("server url '{0}' has no host")]
    MissingHost(String),

    /// No port written in the URL and no well-known port for its scheme.
    #[error("server url '{0}' has no port")]
    MissingPort(String),

    /// Admin user or password is empty.
    #[error("admin credentials are required")]
    MissingCredentials,

    /// The HTTP client for the store could not be built.
    #[error("failed to create store client: {0}")]
    Client(String),
}

/// Basic-auth credentials for the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// URL scheme (`http` or `https`).
    pub scheme: String,
    /// Host taken from the URL authority.
    pub hostname: String,
    /// Port exactly as written in the URL (e.g. `"80"`, `"0080"`).
    pub port: String,
    pub auth: Credentials,
}

impl ConnectionDescriptor {
    /// Derive a descriptor from `scheme://host:port` and an admin credential pair.
    pub fn parse(
        server_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, DescriptorError> {
        let url = Url::parse(server_url).map_err(|e| DescriptorError::InvalidUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;

        let hostname = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| DescriptorError::MissingHost(server_url.to_string()))?
            .to_string();

        let port = literal_port(server_url)
            .or_else(|| url.port_or_known_default().map(|p| p.to_string()))
            .ok_or_else(|| DescriptorError::MissingPort(server_url.to_string()))?;

        let username = username.into();
        let password = password.into();
        if username.is_empty() || password.is_empty() {
            return Err(DescriptorError::MissingCredentials);
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            hostname,
            port,
            auth: Credentials { username, password },
        })
    }

    /// Root URL of the store, without credentials.
    pub fn base_url(&self) -> Result<Url, DescriptorError> {
        let raw = format!("{}://{}:{}/", self.scheme, self.hostname, self.port);
        Url::parse(&raw).map_err(|e| DescriptorError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }
}

/// Port text as it appears in the authority, if one is written.
fn literal_port(server_url: &str) -> Option<String> {
    let (_, rest) = server_url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    let port = match host_port.rfind(']') {
        // IPv6 literal: only a colon after the closing bracket starts a port
        Some(end) => host_port[end + 1..].strip_prefix(':')?,
        None => host_port.rsplit_once(':')?.1,
    };

    (!port.is_empty()).then(|| port.to_string())
}
