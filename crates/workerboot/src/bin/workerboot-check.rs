// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Workerboot Check
//!
//! Runs installation assurance for a named worker against the configured
//! document store and prints the outcome. The worker's install step is a
//! no-op, so on first run this only creates the worker's config document.
//!
//! Usage:
//!   workerboot-check <worker-name>

use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;
use workerboot::{InstallError, Installation, Worker, WorkerConfig, setup};

fn print_usage() {
    eprintln!(
        r#"Usage: workerboot-check <worker-name>

Resolve (and on first run create) a worker's config document.

ENVIRONMENT:
    WORKERBOOT_SERVER               Store address, scheme://host:port (required)
    WORKERBOOT_ADMIN_USER           Store admin user (required)
    WORKERBOOT_ADMIN_PASS           Store admin password (required)
    WORKERBOOT_MANIFEST             Version manifest (default: manifest.json)
    WORKERBOOT_REQUEST_TIMEOUT_MS   Store request timeout (default: 30000)
    RUST_LOG                        Log filter (default: workerboot=info)"#
    );
}

/// Worker with nothing to install.
struct CheckWorker {
    name: String,
}

#[async_trait]
impl Worker for CheckWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn install(&self) -> Result<(), InstallError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workerboot=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        warn!("No .env file loaded: {}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let name = match args.as_slice() {
        [name] if name != "-h" && name != "--help" => name.clone(),
        _ => {
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(name).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(name: String) -> anyhow::Result<()> {
    let config = WorkerConfig::from_env()?;
    let installed = setup(Arc::new(CheckWorker { name }), config).await?;

    let outcome = match &installed.installation {
        Installation::Existing(doc) => json!({"status": "existing", "id": doc.id}),
        Installation::Created(result) => {
            json!({"status": "created", "id": result.id, "rev": result.rev})
        }
    };

    let report = json!({
        "worker": installed.context.name(),
        "version": installed.context.version(),
        "outcome": outcome,
        "effectiveConfig": installed.effective_config(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
