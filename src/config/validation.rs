//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntactic)
//! - Validate value ranges (nonzero timeouts, valid port)
//! - Reject unknown request-logger backends before the server starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `AppConfig → Result<(), Vec<ValidationError>>`

use crate::config::schema::AppConfig;
use crate::observability::logging::LoggerBackend;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener port must be nonzero")]
    ZeroPort,

    #[error("unsupported logger: {0}")]
    UnsupportedLogger(String),

    #[error("database URI must start with mongodb:// or mongodb+srv://, got {0:?}")]
    InvalidDatabaseUri(String),

    #[error("{0} must be nonzero")]
    ZeroTimeout(&'static str),
}

/// Validate the configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    // Absence of LOGGER is rejected later at backend resolution; only an
    // explicitly unknown value is a config-level error.
    if let Some(name) = config.logging.request_logger.as_deref() {
        if LoggerBackend::parse(name).is_none() {
            errors.push(ValidationError::UnsupportedLogger(name.to_string()));
        }
    }

    if let Some(uri) = config.database.uri.as_deref() {
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            errors.push(ValidationError::InvalidDatabaseUri(uri.to_string()));
        }
    }

    for (name, value) in [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.drain_secs", config.timeouts.drain_secs),
        (
            "database.ping_interval_secs",
            config.database.ping_interval_secs,
        ),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.port = 0;
        config.logging.request_logger = Some("syslog".to_string());
        config.database.uri = Some("postgres://db".to_string());
        config.timeouts.drain_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::UnsupportedLogger("syslog".to_string())));
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.drain_secs")));
    }

    #[test]
    fn known_backends_pass() {
        let mut config = AppConfig::default();
        for name in ["access", "structured"] {
            config.logging.request_logger = Some(name.to_string());
            assert!(validate_config(&config).is_ok(), "backend {name} rejected");
        }
    }

    #[test]
    fn srv_uri_accepted() {
        let mut config = AppConfig::default();
        config.database.uri = Some("mongodb+srv://cluster.example.net/app".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
