//! HTTP subsystem.
//!
//! # Responsibilities
//! - Build the Axum router from the route registry
//! - Wire up the fixed middleware chain (tracing, request ID, timeout,
//!   response headers, request logging)
//! - Translate request-handling errors into the uniform JSON error body
//! - Serve with graceful shutdown

pub mod error;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
