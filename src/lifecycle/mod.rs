//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Trigger (signal or fault) → stop accepting → drain → exit code
//!     Running → Draining → Closed(0) | Closed(1)
//!
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → graceful shutdown, exit 0 when drain succeeds
//!     Background task fault → shutdown, exit 1 regardless of drain
//! ```
//!
//! # Design Decisions
//! - First trigger wins; later triggers are ignored
//! - Exit code distinguishes operator-requested shutdown from crash-triggered
//!   shutdown for monitoring
//! - Drain is bounded by the configured drain window, never unbounded

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownCause, ShutdownState};
pub use signals::{listen, spawn_supervised};
