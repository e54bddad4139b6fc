//! Shared utilities for integration testing.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use api_scaffold::config::AppConfig;
use api_scaffold::db::DbStatus;
use api_scaffold::http::HttpServer;
use api_scaffold::lifecycle::Shutdown;
use api_scaffold::observability::LoggerBackend;

/// A running server instance bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestApp {
    pub base_url: String,
    pub shutdown: Arc<Shutdown>,
    pub db_status: watch::Sender<DbStatus>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Default test configuration: structured request logger, short drain window.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.logging.request_logger = Some("structured".to_string());
    config.timeouts.drain_secs = 5;
    config
}

/// Start the server on 127.0.0.1:0 with a controllable database status.
pub async fn spawn_app(config: AppConfig) -> TestApp {
    let (db_tx, db_rx) = watch::channel(DbStatus::Connecting);
    let shutdown = Arc::new(Shutdown::new());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(Arc::new(config), db_rx, LoggerBackend::Structured);
    let sd = shutdown.clone();
    let handle = tokio::spawn(async move { server.run(listener, &sd).await });

    TestApp {
        base_url: format!("http://{addr}"),
        shutdown,
        db_status: db_tx,
        handle,
    }
}
