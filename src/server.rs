use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::Method;
use bytes::Bytes;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::http::{Command, Reply, StatusMode};
use crate::registry::Registry;

/// Default listening port
pub const DEFAULT_PORT: u16 = 9999;

/// Largest accepted request body; larger bodies are answered with 413
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub status_mode: StatusMode,
}

/// Build the router. Every path is served by the same method-dispatched handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn handle_request(State(state): State<AppState>, method: Method, body: Bytes) -> Reply {
    debug!("Received {} request ({} bytes)", method, body.len());
    Command::execute(&method, &body, &state.registry, state.status_mode)
}

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: AppState,
}

impl Server {
    /// Create and bind HTTP server to specified address
    pub async fn bind(
        addr: &str,
        registry: Arc<Registry>,
        status_mode: StatusMode,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            state: AppState {
                registry,
                status_mode,
            },
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.state.registry
    }

    /// Serve requests until Ctrl-C is received
    pub async fn run(self) -> std::io::Result<()> {
        info!(
            "Server started, listening on {} ({:?} status codes)",
            self.local_addr, self.state.status_mode
        );

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
