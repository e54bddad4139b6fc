//! Observability subsystem.
//!
//! Process-level logging via `tracing`, plus selection of the per-request
//! logging backend installed into the middleware chain.

pub mod logging;

pub use logging::{init_tracing, LoggerBackend, LoggerError};
