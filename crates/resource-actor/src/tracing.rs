//! # Tracing Setup
//!
//! The [`setup_tracing`] function installs a `tracing_subscriber` formatter filtered by the
//! `RUST_LOG` environment variable.
//!
//! ## What gets logged
//!
//! - Actor lifecycle: `Actor started` / `Shutdown` with the `entity_type` field
//! - Store operations: `List`, `Get`, `Create`, `Update`, `Delete` at `debug`, committed
//!   writes at `info`, rejected ones at `warn`
//! - Client calls made through [`ActorClient`](crate::ActorClient), each in its own span
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```
//!
//! A rejected update looks like this at `debug`:
//!
//! ```text
//! DEBUG Update entity_type="Person" id=3 fields=PersonFields { name: "", .. }
//!  WARN Update failed entity_type="Person" id=3 error=name must not be empty
//! ```

/// Installs the global subscriber. Calling it a second time is a no-op, so tests that
/// share a process can each call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type carries the context instead of the module path
        .compact()
        .try_init();
}
