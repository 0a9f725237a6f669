//! # System Lifecycle
//!
//! Starts the person store actor, wires the controller on top of it, and shuts it down.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - the controller holds the only `PersonClient`
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs its final size** and its task finishes
//! 4. **Await completion** of the actor task
//!
//! Every clone of the controller handed out by [`PersonSystem::controller`] must be dropped
//! before [`PersonSystem::shutdown`] can complete.

use crate::config::ServerConfig;
use crate::controller::PersonController;
use crate::person_store;
use std::sync::Arc;
use tracing::{error, info};

/// Owns the running person store and the controller in front of it.
///
/// ```rust
/// use person_sync::config::ServerConfig;
/// use person_sync::lifecycle::PersonSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = PersonSystem::new(&ServerConfig::default());
///     let response = system.controller().list().await;
///     assert_eq!(response.status.as_u16(), 200);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct PersonSystem {
    controller: Arc<PersonController>,

    /// Task handles for running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PersonSystem {
    /// Spawns the store actor and builds the controller around its client.
    pub fn new(config: &ServerConfig) -> Self {
        let (person_actor, person_client) = person_store::new(config.channel_capacity);
        let person_handle = tokio::spawn(person_actor.run());

        Self {
            controller: Arc::new(PersonController::new(person_client)),
            handles: vec![person_handle],
        }
    }

    /// A shared handle to the controller.
    pub fn controller(&self) -> Arc<PersonController> {
        self.controller.clone()
    }

    /// Gracefully shuts down the store.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down person system");
        drop(self.controller);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(format!("Actor task failed: {e}"));
            }
        }

        info!("Person system shutdown complete");
        Ok(())
    }
}
