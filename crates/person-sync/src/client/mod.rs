//! # Client
//!
//! The browser-side half of the system, modelled without a browser: an in-memory
//! [`dom::Document`], the [`view`] functions that render persons into it, and the
//! [`ClientSyncAgent`] that applies server-confirmed results to the view.
//!
//! - [`dom`] - element tree and document
//! - [`view`] - display, edit and create forms; reading forms back into fields
//! - [`registry`] - per-person view state
//! - [`transport`] - how the agent reaches the server (HTTP, loopback, mock)
//! - [`agent`] - user operations and the confirm-then-render policy

pub mod agent;
pub mod dom;
pub mod error;
pub mod registry;
pub mod transport;
pub mod view;

pub use agent::{ClientSyncAgent, CONNECTION_NOTICE};
pub use error::{FormError, SyncError};
