//! Shutdown coordination.

use std::sync::Mutex;

use tokio::sync::broadcast;

/// Why shutdown was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    /// SIGINT.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// A background task failed; always exits 1.
    Fault,
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    Draining(ShutdownCause),
    Closed(i32),
}

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that long-running tasks subscribe to, and
/// tracks the `Running → Draining → Closed` transition with its exit code.
pub struct Shutdown {
    tx: broadcast::Sender<ShutdownCause>,
    state: Mutex<ShutdownState>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            state: Mutex::new(ShutdownState::Running),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownCause> {
        self.tx.subscribe()
    }

    /// A future resolving once shutdown has been triggered, including when
    /// the trigger fired before this call. The subscription is taken before
    /// the state check, so no trigger can fall between the two.
    pub fn triggered(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        let already = !matches!(self.state(), ShutdownState::Running);
        async move {
            if !already {
                let _ = rx.recv().await;
            }
        }
    }

    /// Current coordinator state.
    pub fn state(&self) -> ShutdownState {
        *self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Trigger shutdown: `Running → Draining`. First cause wins; triggers
    /// after draining started are ignored.
    pub fn trigger(&self, cause: ShutdownCause) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if *state != ShutdownState::Running {
            return;
        }
        *state = ShutdownState::Draining(cause);
        drop(state);
        let _ = self.tx.send(cause);
    }

    /// Record the drain outcome: `Draining → Closed`, returning the process
    /// exit code. 1 when the drain failed or the trigger was a fault, 0
    /// otherwise.
    pub fn close(&self, drain: &Result<(), std::io::Error>) -> i32 {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let faulted = matches!(*state, ShutdownState::Draining(ShutdownCause::Fault));
        let code = if drain.is_err() || faulted { 1 } else { 0 };
        *state = ShutdownState::Closed(code);
        code
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_signal_shutdown_exits_zero() {
        let shutdown = Shutdown::new();
        assert_eq!(shutdown.state(), ShutdownState::Running);

        shutdown.trigger(ShutdownCause::Interrupt);
        assert_eq!(
            shutdown.state(),
            ShutdownState::Draining(ShutdownCause::Interrupt)
        );

        let code = shutdown.close(&Ok(()));
        assert_eq!(code, 0);
        assert_eq!(shutdown.state(), ShutdownState::Closed(0));
    }

    #[test]
    fn fault_trigger_exits_one_even_when_drain_succeeds() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownCause::Fault);
        assert_eq!(shutdown.close(&Ok(())), 1);
    }

    #[test]
    fn drain_error_exits_one() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownCause::Terminate);
        let failed = Err(std::io::Error::other("close failed"));
        assert_eq!(shutdown.close(&failed), 1);
    }

    #[test]
    fn first_trigger_wins() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownCause::Terminate);
        shutdown.trigger(ShutdownCause::Fault);
        assert_eq!(
            shutdown.state(),
            ShutdownState::Draining(ShutdownCause::Terminate)
        );
        assert_eq!(shutdown.close(&Ok(())), 0);
    }

    #[tokio::test]
    async fn triggered_resolves_for_late_observers() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownCause::Terminate);
        // Created after the trigger fired; must still resolve.
        shutdown.triggered().await;
    }

    #[tokio::test]
    async fn subscribers_observe_the_cause() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger(ShutdownCause::Interrupt);
        assert_eq!(rx.recv().await.unwrap(), ShutdownCause::Interrupt);
    }
}
