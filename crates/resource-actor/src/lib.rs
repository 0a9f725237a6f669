//! # Resource Actor
//!
//! A single-writer, in-memory store for one kind of entity, built on the **Actor Model**.
//! One tokio task owns the collection; everything else talks to it through a cloneable
//! [`ResourceClient`]. Because requests are handled strictly one after another, every
//! create, update and delete is atomic with respect to every other request, and no lock
//! is ever taken.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - the resource type, its fields and validation
//! 2. **Runtime Layer** ([`ResourceActor`]) - id allocation, storage and request handling
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed request/response calls
//!
//! ## Store Contract
//!
//! | Operation | Reply | Failure |
//! |-----------|-------|---------|
//! | `list` | every entity, in creation order | - |
//! | `get(id)` | `Some(entity)` or `None` | - |
//! | `create(fields)` | the stored entity with its new id | entity validation |
//! | `update(id, fields)` | the stored entity after the change | `NotFound`, entity validation |
//! | `delete(id)` | `()` | `NotFound` |
//!
//! Ids are allocated by the actor from a counter that never goes backwards, so an id is
//! never reissued while the actor lives. A rejected write leaves the store exactly as it
//! was.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ResourceActor, StoreEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct City { id: u64, name: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("city name must not be empty")]
//! struct EmptyName;
//!
//! #[async_trait]
//! impl StoreEntity for City {
//!     type Id = u64;
//!     type Fields = String;
//!     type Error = EmptyName;
//!
//!     fn from_fields(id: u64, name: String) -> Result<Self, Self::Error> {
//!         if name.is_empty() { return Err(EmptyName); }
//!         Ok(Self { id, name })
//!     }
//!     fn id(&self) -> &u64 { &self.id }
//!     async fn on_update(&mut self, name: String) -> Result<(), Self::Error> {
//!         if name.is_empty() { return Err(EmptyName); }
//!         self.name = name;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<City>::new(10);
//!     let handle = tokio::spawn(actor.run());
//!
//!     let bern = client.create("Bern".to_string()).await.unwrap();
//!     assert!(client.update(bern.id, String::new()).await.is_err());
//!     assert_eq!(client.get(bern.id).await.unwrap().unwrap().name, "Bern");
//!
//!     // Dropping the last client ends the actor loop.
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that hands out a real `ResourceClient<T>`
//! answered from scripted expectations, for testing code that sits above the store
//! without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::StoreEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
