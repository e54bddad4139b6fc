//! HTTP service scaffold.
//!
//! # Boot Sequence
//! ```text
//! load env files + config → validate → init tracing
//!     → spawn database connect (fire-and-forget, supervised)
//!     → build router (registry + middleware chain)
//!     → bind listener → banner → serve
//!     → SIGINT / SIGTERM / fault → drain → exit 0 | 1
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};

use api_scaffold::config::AppConfig;
use api_scaffold::db::{self, DbStatus};
use api_scaffold::http::HttpServer;
use api_scaffold::lifecycle::{signals, Shutdown};
use api_scaffold::net::{self, Family};
use api_scaffold::observability::{self, LoggerBackend};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("startup failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Arc::new(api_scaffold::config::load()?);

    observability::init_tracing();
    let logger = LoggerBackend::from_config(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        app = %config.app_name,
        request_timeout_secs = config.timeouts.request_secs,
        drain_timeout_secs = config.timeouts.drain_secs,
        "configuration loaded"
    );

    let shutdown = Arc::new(Shutdown::new());
    let (fault_tx, fault_rx) = mpsc::channel(4);

    // Database connect is deliberately not awaited; the readiness gate on
    // /healthz covers the window where traffic arrives first.
    let (db_tx, db_rx) = watch::channel(DbStatus::Connecting);
    signals::spawn_supervised(
        "database",
        fault_tx.clone(),
        db::run(config.database.clone(), config.timeouts.clone(), db_tx),
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let port = listener.local_addr()?.port();
    banner(&config, port);

    tokio::spawn(signals::listen(shutdown.clone(), fault_rx));

    let server = HttpServer::new(config.clone(), db_rx, logger);
    let result = server.run(listener, &shutdown).await;
    if let Err(ref err) = result {
        tracing::error!(error = %err, "server did not close cleanly");
    }

    let code = shutdown.close(&result);
    tracing::info!(code, "shutdown complete");

    Ok(if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Human-readable startup banner with the first external IPv4 address.
fn banner(config: &AppConfig, port: u16) {
    let interfaces = net::system_interfaces();
    let addr = net::first_address(&interfaces, Family::V4, false)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| config.listener.host.clone());

    tracing::info!(
        "[{}] {} running on {}:{}",
        config.environment,
        config.app_name,
        addr,
        port
    );
    if let Some(tz) = &config.timezone {
        tracing::info!("[{}] timezone {}", config.environment, tz);
    }
}
