use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Which signal ended the wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    Interrupt,
    Terminate,
}

/// Wait for SIGINT or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other signal still works.
async fn wait_for_termination() -> Termination {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => Termination::Interrupt,
        _ = terminate => Termination::Terminate,
    }
}

/// Shutdown coordinator that manages graceful application shutdown.
///
/// Receives SIGTERM/SIGINT once and broadcasts it to every subscriber.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator and a receiver for its signal.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and notify all subscribers. Only the first call
    /// broadcasts.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Wait for SIGTERM or SIGINT, then [`shutdown`](Self::shutdown).
    pub async fn wait_for_signal(&self) {
        match wait_for_termination().await {
            Termination::Interrupt => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown")
            }
            Termination::Terminate => info!("Received SIGTERM, initiating graceful shutdown"),
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Shutdown future for `axum::serve().with_graceful_shutdown()` without
/// cleanup coordination.
pub async fn shutdown_signal() {
    match wait_for_termination().await {
        Termination::Interrupt => info!("Received Ctrl+C signal, shutting down gracefully"),
        Termination::Terminate => info!("Received SIGTERM signal, shutting down gracefully"),
    }
}

/// Shutdown future used by `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_broadcasts_once() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();
        coordinator.shutdown();

        assert!(coordinator.is_shutting_down());
        assert!(rx.recv().await.is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscribers_share_state_with_clones() {
        let (coordinator, _rx) = ShutdownCoordinator::new();
        let clone = coordinator.clone();
        let mut late = clone.subscribe();

        coordinator.shutdown();

        assert!(clone.is_shutting_down());
        assert!(late.recv().await.is_ok());
    }
}
