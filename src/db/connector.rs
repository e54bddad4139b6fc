//! MongoDB connection and supervision.

use std::time::Duration;

use mongodb::{bson::doc, options::ClientOptions, Client};
use tokio::sync::watch;

use crate::config::schema::{DatabaseConfig, TimeoutConfig};

/// Connectivity status published to the readiness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStatus {
    Connecting,
    Connected,
    Disconnected,
}

/// Error type for database connection.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("no resolvable host in MongoDB URI")]
    NoHost,

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Connect and supervise the database for the process lifetime.
///
/// Spawned from bootstrap and never awaited: the HTTP listener starts
/// regardless of connection outcome. Publishes status over `status`.
pub async fn run(
    config: DatabaseConfig,
    timeouts: TimeoutConfig,
    status: watch::Sender<DbStatus>,
) {
    let Some(uri) = config.uri.clone() else {
        tracing::warn!("MONGO_URI not set, running without a database");
        let _ = status.send(DbStatus::Disconnected);
        return;
    };

    match connect(&uri, &timeouts).await {
        Ok((client, host)) => {
            tracing::info!(%host, "MongoDB connected");
            tracing::info!("MongoDB connection opened");
            let _ = status.send(DbStatus::Connected);
            supervise(client, &uri, &config, &timeouts, &status, &host).await;
        }
        Err(err) => {
            tracing::error!(error = %err, "MongoDB connection FAILURE");
            let _ = status.send(DbStatus::Disconnected);
        }
    }
}

/// Open a client for `uri` and verify it with a ping.
///
/// Fails when the URI resolves to no host. Timeouts come from the named
/// config knobs, not driver defaults.
async fn connect(uri: &str, timeouts: &TimeoutConfig) -> Result<(Client, String), DbError> {
    tracing::info!("Connecting to MongoDB");

    let mut options = ClientOptions::parse(uri).await?;
    options.connect_timeout = Some(Duration::from_secs(timeouts.connect_secs));
    options.server_selection_timeout = Some(Duration::from_secs(timeouts.connect_secs));

    let Some(host) = options.hosts.first().map(ToString::to_string) else {
        return Err(DbError::NoHost);
    };

    let client = Client::with_options(options)?;
    ping(&client).await?;

    Ok((client, host))
}

async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Observe connectivity with periodic pings.
///
/// On the first failed ping after a connected period: log a warning and make
/// exactly one reconnect attempt with the same URI and options. If that
/// attempt fails the status stays disconnected; later successful pings on the
/// original client still flip it back.
async fn supervise(
    mut client: Client,
    uri: &str,
    config: &DatabaseConfig,
    timeouts: &TimeoutConfig,
    status: &watch::Sender<DbStatus>,
    host: &str,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.ping_interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // First tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;

        match ping(&client).await {
            Ok(()) => {
                if *status.borrow() == DbStatus::Disconnected {
                    tracing::info!(%host, "MongoDB reconnected");
                }
                let _ = status.send(DbStatus::Connected);
            }
            Err(err) => {
                let was_connected = *status.borrow() == DbStatus::Connected;
                let _ = status.send(DbStatus::Disconnected);

                if !was_connected {
                    tracing::debug!(error = %err, "MongoDB still disconnected");
                    continue;
                }

                tracing::warn!(error = %err, "MongoDB disconnected");
                match connect(uri, timeouts).await {
                    Ok((fresh, fresh_host)) => {
                        tracing::info!(host = %fresh_host, "MongoDB reconnected");
                        client = fresh;
                        let _ = status.send(DbStatus::Connected);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "MongoDB reconnect attempt failed");
                    }
                }
            }
        }
    }
}
