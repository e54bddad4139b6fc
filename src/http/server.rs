//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router from the route registry
//! - Wire up middleware (tracing, request ID, timeout, fixed headers,
//!   request log)
//! - Serve on one TCP listener with graceful, bounded drain

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::DbStatus;
use crate::http::middleware::{request_log, response_headers};
use crate::lifecycle::Shutdown;
use crate::observability::logging::LoggerBackend;
use crate::routes::RouteRegistry;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_status: watch::Receiver<DbStatus>,
    pub logger: LoggerBackend,
}

/// HTTP server for the scaffold.
pub struct HttpServer {
    router: Router,
    drain: Duration,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(
        config: Arc<AppConfig>,
        db_status: watch::Receiver<DbStatus>,
        logger: LoggerBackend,
    ) -> Self {
        let drain = Duration::from_secs(config.timeouts.drain_secs);
        let state = AppState {
            config: config.clone(),
            db_status,
            logger,
        };
        let router = Self::build_router(&config, state);
        Self { router, drain }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        RouteRegistry::builtin()
            .into_router()
            .layer(middleware::from_fn_with_state(state.clone(), request_log))
            .layer(middleware::from_fn(response_headers))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server until the shutdown coordinator fires, then drain.
    ///
    /// Returns once all in-flight connections finished or the drain window
    /// elapsed; the latter surfaces as an error so the exit code reflects an
    /// unclean close.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown.triggered());

        let mut serving = std::pin::pin!(server.into_future());

        tokio::select! {
            result = &mut serving => {
                tracing::info!("HTTP server stopped");
                return result;
            }
            _ = shutdown.triggered() => {
                tracing::info!("Stopped accepting connections, draining");
            }
        }

        match tokio::time::timeout(self.drain, &mut serving).await {
            Ok(result) => {
                tracing::info!("HTTP server stopped");
                result
            }
            Err(_) => {
                tracing::warn!(
                    drain_secs = self.drain.as_secs(),
                    "drain window elapsed with connections still open"
                );
                Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "drain window elapsed",
                ))
            }
        }
    }
}
