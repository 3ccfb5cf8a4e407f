//! Server construction and runtime.
//!
//! The server is an explicitly constructed object owning its configuration;
//! there are no ambient globals. `router` is split out so tests can drive
//! the handler against a temporary storage root without binding a socket.

use crate::config::FiledropConfig;
use crate::upload;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// State shared by every request handler.
pub struct ServerState {
    /// Base directory uploads are written under.
    pub storage_root: PathBuf,
}

/// The upload service: one fallback route catching every path.
pub struct FiledropServer {
    config: FiledropConfig,
}

impl FiledropServer {
    pub fn new(config: FiledropConfig) -> Self {
        Self { config }
    }

    /// Router with every path falling through to the upload handler.
    pub fn router(storage_root: PathBuf) -> Router {
        let state = Arc::new(ServerState { storage_root });
        Router::new()
            .fallback(upload::handle_request)
            .with_state(state)
    }

    /// Bind the configured port on all interfaces and serve until the
    /// task is cancelled or the listener fails.
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        tracing::info!(
            %addr,
            root = %self.config.storage_root.display(),
            "filedrop listening"
        );
        let router = Self::router(self.config.storage_root);
        axum::serve(listener, router).await.context("server error")?;
        Ok(())
    }
}
