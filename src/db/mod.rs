//! Database subsystem.
//!
//! # Data Flow
//! ```text
//! Boot:
//!     run() spawned fire-and-forget (never awaited by bootstrap)
//!     → connect: parse URI, check resolvable host, ping
//!     → publish DbStatus over a watch channel
//!
//! Steady state (connector.rs supervisor):
//!     Periodic ping
//!     → on first failure: warn + exactly one reconnect with the same URI
//!     → status transitions logged (connected / disconnected / reconnected)
//! ```
//!
//! # Design Decisions
//! - Server startup never waits for the database; the readiness gate on
//!   /healthz is the opt-in mitigation
//! - One reconnect attempt per observed disconnect, no backoff

pub mod connector;

pub use connector::{run, DbError, DbStatus};
