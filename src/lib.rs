//! Minimal production HTTP service scaffold.
//!
//! Wires an Axum server behind a fixed middleware chain (request ID, request
//! logging, fixed CORS-style response headers, request timeout), mounts an
//! explicit route registry (Kubernetes probes plus a public test route),
//! supervises a MongoDB connection, and performs signal-driven graceful
//! shutdown with exit-code semantics.

pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routes;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
