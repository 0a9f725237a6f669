//! # ActorClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default `list`, `get`
//! and `delete` methods built on top of a generic `ResourceClient`.
use crate::{FrameworkError, ResourceClient, StoreEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the read and delete operations.
///
/// A wrapper implements `inner` and `map_error`; the provided methods forward to the
/// generic client and translate its errors into the wrapper's error type.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, FrameworkError, ResourceClient, StoreEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u64, label: String }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// #[async_trait]
/// impl StoreEntity for Tag {
///     type Id = u64;
///     type Fields = String;
///     type Error = TagError;
///     fn from_fields(id: u64, label: String) -> Result<Self, Self::Error> { Ok(Self { id, label }) }
///     fn id(&self) -> &u64 { &self.id }
///     async fn on_update(&mut self, label: String) -> Result<(), Self::Error> {
///         self.label = label;
///         Ok(())
///     }
/// }
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// #[async_trait]
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // list(), get() and delete() are provided automatically
///     let _ = client.list().await;
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch every entity, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
