//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for process logs
//! - Resolve the configured request-logger backend
//!
//! # Design Decisions
//! - Exactly two request-logger backends, mutually exclusive, selected by the
//!   `LOGGER` config value; an absent or unknown value fails startup
//! - Log level configurable via `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::LoggingConfig;

/// Initialize the global tracing subscriber.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_scaffold=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Per-request logging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerBackend {
    /// Line-oriented access log: one formatted line per request.
    Access,
    /// Structured log: one tracing event per request, carrying the path.
    Structured,
}

/// The configured logger name matched neither backend, or was absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggerError {
    #[error("unsupported logger: {0}")]
    Unknown(String),

    #[error("unsupported logger: none configured (set LOGGER=access or LOGGER=structured)")]
    Missing,
}

impl LoggerBackend {
    /// Parse a backend name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "access" => Some(Self::Access),
            "structured" => Some(Self::Structured),
            _ => None,
        }
    }

    /// Resolve the backend from config, rejecting absent or unknown values.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        match config.request_logger.as_deref() {
            None => Err(LoggerError::Missing),
            Some(name) => {
                Self::parse(name).ok_or_else(|| LoggerError::Unknown(name.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_backends() {
        let config = LoggingConfig {
            request_logger: Some("access".to_string()),
        };
        assert_eq!(
            LoggerBackend::from_config(&config),
            Ok(LoggerBackend::Access)
        );

        let config = LoggingConfig {
            request_logger: Some("structured".to_string()),
        };
        assert_eq!(
            LoggerBackend::from_config(&config),
            Ok(LoggerBackend::Structured)
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        let config = LoggingConfig {
            request_logger: Some("pino".to_string()),
        };
        assert_eq!(
            LoggerBackend::from_config(&config),
            Err(LoggerError::Unknown("pino".to_string()))
        );
    }

    #[test]
    fn rejects_missing_backend() {
        let config = LoggingConfig {
            request_logger: None,
        };
        assert_eq!(LoggerBackend::from_config(&config), Err(LoggerError::Missing));
    }
}
