//! Configuration loading from env files and the process environment.
//!
//! # Responsibilities
//! - Load layered env files: `.config.env` (base), then the environment
//!   overlay (`.env` in production, `.dev.env` otherwise)
//! - Build the typed [`AppConfig`] from the process environment
//! - Run semantic validation before the config is accepted
//!
//! # Design Decisions
//! - First-load-wins: neither file overrides variables already set in the
//!   process environment, so operator overrides always take precedence
//! - A missing env file is not an error; a malformed one is

use std::env;
use std::path::{Path, PathBuf};

use crate::config::schema::{
    AppConfig, DatabaseConfig, Environment, ListenerConfig, LoggingConfig, ReadinessConfig,
    TimeoutConfig,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, build and validate the configuration from the current directory.
pub fn load() -> Result<AppConfig, ConfigError> {
    load_env_files(Path::new("."))?;
    let config = from_env()?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply the layered env files rooted at `root`.
///
/// The base file is applied first so that `APP_ENV` set there can select the
/// overlay file.
pub fn load_env_files(root: &Path) -> Result<(), ConfigError> {
    apply_env_file(root.join(".config.env"))?;
    let environment = environment_from_env();
    apply_env_file(root.join(environment.secrets_file()))?;
    Ok(())
}

fn apply_env_file(path: PathBuf) -> Result<(), ConfigError> {
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(ref io)) if io.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConfigError::EnvFile { path, source }),
    }
}

fn environment_from_env() -> Environment {
    env::var("APP_ENV")
        .map(|v| Environment::parse(&v))
        .unwrap_or_default()
}

/// Build the typed configuration from the process environment.
pub fn from_env() -> Result<AppConfig, ConfigError> {
    Ok(AppConfig {
        environment: environment_from_env(),
        app_name: var_or("APP_NAME", "service"),
        timezone: var_opt("TZ"),
        listener: ListenerConfig {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 3000)?,
        },
        database: DatabaseConfig {
            uri: var_opt("MONGO_URI"),
            ping_interval_secs: parse_var("DB_PING_INTERVAL_SECS", 10)?,
        },
        logging: LoggingConfig {
            request_logger: var_opt("LOGGER"),
        },
        timeouts: TimeoutConfig {
            request_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            connect_secs: parse_var("DB_CONNECT_TIMEOUT_SECS", 10)?,
            drain_secs: parse_var("DRAIN_TIMEOUT_SECS", 30)?,
        },
        readiness: ReadinessConfig {
            require_database: parse_var("READINESS_REQUIRE_DB", false)?,
        },
    })
}

fn var_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    var_opt(name).unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var_opt(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parse_is_lenient() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("  PRODUCTION "), Environment::Production);
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse(""), Environment::Development);
    }

    #[test]
    fn secrets_file_per_environment() {
        assert_eq!(Environment::Production.secrets_file(), ".env");
        assert_eq!(Environment::Development.secrets_file(), ".dev.env");
    }
}
