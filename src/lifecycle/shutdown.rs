//! Stop signal shared by the HTTP server and the signal watcher.

use tokio::sync::broadcast;

/// One-shot stop broadcast for the mock provider service.
///
/// `HttpServer::run` holds a receiver and stops accepting connections once
/// it fires, then drains in-flight provider requests. The signal watcher in
/// `startup` (or a test) owns the `Shutdown` and fires it.
pub struct Shutdown {
    stop: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        // A single slot: the only message ever sent is "stop".
        let (stop, _) = broadcast::channel(1);
        Self { stop }
    }

    /// Receiver to hand to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.stop.subscribe()
    }

    /// Tell every server to stop. Returns how many receivers were notified;
    /// zero means nothing was serving.
    pub fn trigger(&self) -> usize {
        let notified = self.stop.send(()).unwrap_or(0);
        tracing::info!(servers = notified, "Stopping provider endpoints");
        notified
    }

    /// Servers that have not yet finished draining.
    pub fn receiver_count(&self) -> usize {
        self.stop.receiver_count()
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

    #[tokio::test]
    async fn test_trigger_reaches_all_servers() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        assert_eq!(shutdown.trigger(), 2);
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_with_nothing_serving() {
        assert_eq!(Shutdown::default().trigger(), 0);
    }

    #[test]
    fn test_dropped_receiver_is_not_counted() {
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        drop(rx);
        assert_eq!(shutdown.receiver_count(), 0);
    }
}
