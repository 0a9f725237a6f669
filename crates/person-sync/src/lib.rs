//! # Person Sync
//!
//! A REST-exposed person store and a client that keeps a rendered view of it in
//! lock-step with the server.
//!
//! ## Core Components
//!
//! - **[model]**: The [`Person`](model::Person) resource and its field payloads.
//! - **[person_store]**: The canonical collection, a [`ResourceActor`](resource_actor::ResourceActor) over `Person`.
//! - **[clients]**: [`PersonClient`](clients::PersonClient), the typed wrapper around the store's channel.
//! - **[controller]**: Request validation and status mapping, independent of HTTP.
//! - **[server]**: The axum routes and the [`serve`](server::serve) entry point.
//! - **[client]**: Document, views, transports and the [`ClientSyncAgent`](client::ClientSyncAgent).
//! - **[lifecycle]**: [`PersonSystem`](lifecycle::PersonSystem), which starts and stops the store.
//! - **[config]**: [`ServerConfig`](config::ServerConfig) from the environment.
//!
//! ## Testing
//!
//! See [`resource_actor::mock`] for faking the store and
//! [`client::transport::MockTransport`] for faking the server.

pub mod client;
pub mod clients;
pub mod config;
pub mod controller;
pub mod lifecycle;
pub mod model;
pub mod person_store;
pub mod server;
