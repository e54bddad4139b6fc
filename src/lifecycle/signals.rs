//! OS signal handling and background task supervision.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM)
//! - Translate signals and background task faults into shutdown triggers
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A fault from any supervised background task forces shutdown with exit 1,
//!   the moral equivalent of an unhandled rejection

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, ShutdownCause};

/// Wait for a termination signal or a background fault, then trigger the
/// coordinator once.
pub async fn listen(shutdown: Arc<Shutdown>, mut faults: mpsc::Receiver<String>) {
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("failed to install SIGTERM handler");

    let fault = async move {
        match faults.recv().await {
            Some(message) => message,
            // All fault senders dropped; only signals can end the process.
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT, graceful shutdown");
            shutdown.trigger(ShutdownCause::Interrupt);
        }
        _ = terminate.recv() => {
            tracing::info!("Received SIGTERM, graceful shutdown");
            shutdown.trigger(ShutdownCause::Terminate);
        }
        message = fault => {
            tracing::error!(%message, "unhandled background fault");
            shutdown.trigger(ShutdownCause::Fault);
        }
    }
}

/// Spawn a background task whose panic is reported as a fault instead of
/// being lost.
pub fn spawn_supervised<F>(
    name: &'static str,
    faults: mpsc::Sender<String>,
    task: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = tokio::spawn(task).await {
            let _ = faults.send(format!("{name}: {err}")).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn supervised_panic_reports_a_fault() {
        let (tx, mut rx) = mpsc::channel(1);
        spawn_supervised("worker", tx, async {
            panic!("boom");
        });

        let message = rx.recv().await.unwrap();
        assert!(message.starts_with("worker:"), "got {message:?}");
    }

    #[tokio::test]
    async fn fault_triggers_shutdown() {
        let shutdown = Arc::new(Shutdown::new());
        let (tx, rx) = mpsc::channel(1);
        let listener = tokio::spawn(listen(shutdown.clone(), rx));

        tx.send("database: boom".to_string()).await.unwrap();
        listener.await.unwrap();

        assert_eq!(shutdown.close(&Ok(())), 1);
    }
}
