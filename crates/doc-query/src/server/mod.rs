//! HTTP server for the document query service

pub mod routes;
pub mod state;
pub mod ui;

use std::net::SocketAddr;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Document query HTTP server
pub struct QueryServer {
    config: AppConfig,
    state: AppState,
}

impl QueryServer {
    /// Create a new server
    pub fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Build the router (exposed separately for tests)
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Start serving
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid address: {e}")))?;

        let router = self.router();

        tracing::info!("starting doc-query server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("failed to bind: {e}")))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("server error: {e}")))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}
