// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Static worker configuration.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SetupError};

/// Admin credentials for the document store.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Static configuration a worker is started with.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Document store address, `scheme://host:port`.
    pub server: String,
    /// Store admin credentials.
    pub admin: AdminCredentials,
    /// JSON manifest the worker version is read from (default: "manifest.json")
    pub manifest_path: PathBuf,
    /// Store request timeout (default: 30s)
    pub request_timeout: Duration,
}

impl WorkerConfig {
    /// Create a configuration for the given server and admin credentials.
    pub fn new(
        server: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            admin: AdminCredentials {
                user: user.into(),
                pass: pass.into(),
            },
            manifest_path: PathBuf::from("manifest.json"),
            request_timeout: Duration::from_millis(30_000),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `WORKERBOOT_SERVER` - Document store address
    /// - `WORKERBOOT_ADMIN_USER` - Store admin user
    /// - `WORKERBOOT_ADMIN_PASS` - Store admin password
    ///
    /// # Optional Environment Variables
    /// - `WORKERBOOT_MANIFEST` - Version manifest path (default: "manifest.json")
    /// - `WORKERBOOT_REQUEST_TIMEOUT_MS` - Store request timeout (default: 30000)
    pub fn from_env() -> Result<Self> {
        let server = required("WORKERBOOT_SERVER")?;
        let user = required("WORKERBOOT_ADMIN_USER")?;
        let pass = required("WORKERBOOT_ADMIN_PASS")?;

        let mut config = Self::new(server, user, pass);

        if let Ok(path) = env::var("WORKERBOOT_MANIFEST") {
            config.manifest_path = PathBuf::from(path);
        }

        if let Ok(raw) = env::var("WORKERBOOT_REQUEST_TIMEOUT_MS") {
            let ms: u64 = raw.parse().map_err(|e| {
                SetupError::Config(format!("invalid WORKERBOOT_REQUEST_TIMEOUT_MS: {}", e))
            })?;
            config.request_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Set the version manifest path.
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Set the store request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| SetupError::Config(format!("{} is required", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "WORKERBOOT_SERVER",
        "WORKERBOOT_ADMIN_USER",
        "WORKERBOOT_ADMIN_PASS",
        "WORKERBOOT_MANIFEST",
        "WORKERBOOT_REQUEST_TIMEOUT_MS",
    ];

    fn set_env(vars: &[(&str, &str)]) {
        // SAFETY: env tests are marked #[serial] so nothing else touches the environment
        unsafe {
            for name in VARS {
                env::remove_var(name);
            }
            for (name, value) in vars {
                env::set_var(name, value);
            }
        }
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("WORKERBOOT_SERVER", "https://couch.myapp.com:80"),
        ("WORKERBOOT_ADMIN_USER", "admin"),
        ("WORKERBOOT_ADMIN_PASS", "secret"),
    ];

    #[test]
    #[serial]
    fn test_from_env_required_and_defaults() {
        set_env(&REQUIRED);

        let config = WorkerConfig::from_env().unwrap();

        assert_eq!(config.server, "https://couch.myapp.com:80");
        assert_eq!(config.admin.user, "admin");
        assert_eq!(config.admin.pass, "secret");
        assert_eq!(config.manifest_path, PathBuf::from("manifest.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_optional_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("WORKERBOOT_MANIFEST", "/opt/worker/manifest.json"));
        vars.push(("WORKERBOOT_REQUEST_TIMEOUT_MS", "1500"));
        set_env(&vars);

        let config = WorkerConfig::from_env().unwrap();

        assert_eq!(
            config.manifest_path,
            PathBuf::from("/opt/worker/manifest.json")
        );
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_required_variable() {
        set_env(&REQUIRED[..2]);

        let err = WorkerConfig::from_env().unwrap_err();

        match err {
            SetupError::Config(msg) => assert_eq!(msg, "WORKERBOOT_ADMIN_PASS is required"),
            other => panic!("expected config error, got {:?}", other),
        }
        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("WORKERBOOT_REQUEST_TIMEOUT_MS", "soon"));
        set_env(&vars);

        let err = WorkerConfig::from_env().unwrap_err();

        match err {
            SetupError::Config(msg) => {
                assert!(msg.starts_with("invalid WORKERBOOT_REQUEST_TIMEOUT_MS"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
        set_env(&[]);
    }

    #[test]
    fn test_new_config_defaults() {
        let config = WorkerConfig::new("https://couch.myapp.com:80", "admin", "secret");

        assert_eq!(config.server, "https://couch.myapp.com:80");
        assert_eq!(config.admin.user, "admin");
        assert_eq!(config.admin.pass, "secret");
        assert_eq!(config.manifest_path, PathBuf::from("manifest.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = WorkerConfig::new("http://localhost:5984", "a", "b")
            .with_manifest_path("/opt/worker/manifest.json")
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(
            config.manifest_path,
            PathBuf::from("/opt/worker/manifest.json")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = WorkerConfig::new("http://localhost:5984", "admin", "hunter2");
        let debug_str = format!("{:?}", config);

        assert!(debug_str.contains("admin"));
        assert!(debug_str.contains("localhost:5984"));
        assert!(!debug_str.contains("hunter2"));
    }
}
