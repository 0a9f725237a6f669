//! # HTTP Server
//!
//! Serves the person collection over HTTP with axum. [`serve`] starts a
//! [`PersonSystem`], binds the configured address and runs until Ctrl-C, then drains
//! in-flight requests and shuts the store down.

pub mod routes;

use crate::config::ServerConfig;
use crate::lifecycle::PersonSystem;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

pub use routes::router;

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shutdown failed: {0}")]
    Shutdown(String),
}

/// Runs the server until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let system = PersonSystem::new(&config);
    let app = router(system.controller(), &config.api_prefix);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        prefix = %config.api_prefix,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, shutting down store");
    system.shutdown().await.map_err(ServerError::Shutdown)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
