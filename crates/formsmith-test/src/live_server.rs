//! A live HTTP server for integration tests.
//!
//! [`LiveServer`] serves an Axum router on a random local port so that code
//! under test can talk to it with a real HTTP client.
//!
//! ```rust,no_run
//! use axum::routing::get;
//! use axum::Router;
//! use formsmith_test::LiveServer;
//!
//! async fn example() {
//!     let app = Router::new().route("/", get(|| async { "ok" }));
//!     let server = LiveServer::start(app).await;
//!     println!("serving at {}", server.url());
//!     server.stop().await;
//! }
//! ```

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// An Axum application bound to `127.0.0.1` on a random port.
///
/// Dropping the server signals shutdown; [`stop`](Self::stop) also waits
/// for the background task to finish.
pub struct LiveServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<JoinHandle<()>>,
}

impl LiveServer {
    /// Starts serving `app` in a background task.
    ///
    /// # Panics
    ///
    /// Panics if the TCP listener cannot be bound.
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });
        tracing::debug!(%addr, "live server started");

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            server_handle: Some(server_handle),
        }
    }

    /// Returns the base URL, e.g. `http://127.0.0.1:43210`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns the bound address.
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shuts the server down and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_serves_requests() {
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let server = LiveServer::start(app).await;
        assert!(server.url().starts_with("http://127.0.0.1:"));

        let body = reqwest::get(format!("{}/ping", server.url()))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "pong");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_stop_releases_port() {
        let server = LiveServer::start(Router::new()).await;
        let addr = server.addr();
        server.stop().await;
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }
}
