//! Serving with a bounded graceful shutdown

use std::{future::Future, io, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped after the shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All connections closed within the timeout
    Drained,
    /// Connections were still open when the timeout elapsed
    TimedOut,
}

/// Serve `app` until `signal` resolves, then drain for at most `timeout`
///
/// Connections still open once the timeout elapses are dropped.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    timeout: Duration,
) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stopping = Arc::new(Notify::new());
    let trigger = Arc::clone(&stopping);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        signal.await;
        info!("Waiting up to {:?} for connections to close...", timeout);
        trigger.notify_one();
    });

    let deadline = async {
        stopping.notified().await;
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = server => {
            result?;
            Ok(ShutdownOutcome::Drained)
        }
        () = deadline => {
            warn!(?timeout, "Shutdown timeout elapsed, dropping open connections");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
