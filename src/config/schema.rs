//! Configuration schema definitions.
//!
//! The complete configuration structure for the service. All types derive
//! Serde traits so a config snapshot can be serialized for diagnostics.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment, selects the secrets overlay file.
    pub environment: Environment,

    /// Human-readable application name, used in the startup banner.
    pub app_name: String,

    /// Timezone label echoed in the startup banner (informational only).
    pub timezone: Option<String>,

    /// Listener configuration (bind host/port).
    pub listener: ListenerConfig,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Request logger selection.
    pub logging: LoggingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Readiness gate settings.
    pub readiness: ReadinessConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse the `APP_ENV` value; anything other than `production` is development.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Secrets overlay file loaded after the base `.config.env`.
    pub fn secrets_file(&self) -> &'static str {
        match self {
            Self::Production => ".env",
            Self::Development => ".dev.env",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (e.g. "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string. When unset, the service runs without a
    /// database and the readiness gate (if enabled) never passes.
    pub uri: Option<String>,

    /// Interval between connectivity pings from the supervisor task.
    pub ping_interval_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            ping_interval_secs: 10,
        }
    }
}

/// Request logger selection.
///
/// Holds the raw `LOGGER` value; resolution into a backend happens at startup
/// and fails the boot when the value is absent or unrecognized.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Request logger backend name (`access` or `structured`).
    pub request_logger: Option<String>,
}

/// Timeout configuration.
///
/// Every timeout is a named knob with a documented default; nothing relies on
/// library defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout.
    pub request_secs: u64,

    /// Database connect / server-selection timeout.
    pub connect_secs: u64,

    /// Shutdown drain window: in-flight connections past this are abandoned.
    pub drain_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
            drain_secs: 30,
        }
    }
}

/// Readiness gate settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ReadinessConfig {
    /// When true, `GET /healthz` returns 503 until the database is connected.
    /// Defaults to false: the service historically served traffic regardless
    /// of database state.
    pub require_database: bool,
}
