//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Boot:
//!     Load env files (loader.rs: .config.env, then .env / .dev.env)
//!     → Read process environment into AppConfig (schema.rs)
//!     → Validate (validation.rs)
//!     → Config is immutable for the process lifetime
//! ```
//!
//! # Design Decisions
//! - First-load-wins: env files never override already-set process variables
//! - Missing env files are tolerated; malformed ones are fatal
//! - All timeouts are explicit named knobs, no hidden defaults in call sites

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::{
    AppConfig, DatabaseConfig, Environment, ListenerConfig, LoggingConfig, ReadinessConfig,
    TimeoutConfig,
};
