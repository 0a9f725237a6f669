//! # Person Store
//!
//! The canonical collection of persons: a [`ResourceActor<Person>`] plus its typed client.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](resource_actor::StoreEntity) implementation for [`Person`]
//! - [`error`] - [`PersonError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use person_sync::person_store;
//! use person_sync::model::PersonFields;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = person_store::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let ana = client.create_person(PersonFields::new("Ana", 30, true)).await?;
//!     assert_eq!(ana.id.0, 1);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PersonClient;
use crate::model::Person;
use resource_actor::ResourceActor;

/// Creates a new Person actor and its client.
pub fn new(channel_capacity: usize) -> (ResourceActor<Person>, PersonClient) {
    let (actor, generic_client) = ResourceActor::new(channel_capacity);
    let client = PersonClient::new(generic_client);

    (actor, client)
}
