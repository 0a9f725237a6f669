//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the contract a resource type implements to be held by a
//! [`ResourceActor`](crate::ResourceActor). It names the identifier type, the field payload used
//! for create and update, and the entity's error type, and it exposes lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`) through which the entity can veto an operation.
//!
//! # Provided Methods (Hooks)
//! - [`StoreEntity::on_create`]
//! - [`StoreEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to be managed by a `ResourceActor`.
///
/// The actor owns id allocation: ids are produced from a monotonically increasing `u64`
/// counter and converted with `From<u64>`, so an id is never handed out twice during the
/// actor's lifetime. `Ord` keeps the listing in allocation (creation) order.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u64>;

    /// The mutable fields of the entity. Used for create and for full-replace updates.
    type Fields: Send + Sync + Debug;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from a freshly allocated id and its fields.
    /// This is called synchronously before `on_create`.
    fn from_fields(id: Self::Id, fields: Self::Fields) -> Result<Self, Self::Error>;

    /// Returns the entity's id.
    fn id(&self) -> &Self::Id;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is inserted.
    async fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Replaces the mutable fields of the entity.
    ///
    /// The actor applies this to a scratch copy and only commits it when the hook
    /// succeeds, so an error here never leaves a half-written entity behind.
    async fn on_update(&mut self, fields: Self::Fields) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
