use person_sync::config::ServerConfig;
use person_sync::server;
use resource_actor::tracing::setup_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServerConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    info!(?config, "Starting person server");

    server::serve(config).await.map_err(|e| {
        error!(error = %e, "Server failed");
        e.to_string()
    })?;

    info!("Server exited cleanly");
    Ok(())
}
