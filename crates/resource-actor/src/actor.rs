//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, which owns the canonical copy of every entity
//! of one type. It processes requests one at a time, so each read-modify-write is atomic
//! without any locking.

use crate::client::ResourceClient;
use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half of the actor. It owns the store and the receiver end
/// of the channel. Requests are handled sequentially in [`ResourceActor::run`], which
/// gives the store single-writer semantics: no two operations interleave, and a caller
/// never observes a partial write.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` and its `client`.
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client wherever requests are issued.
///
/// ```rust
/// use resource_actor::{ResourceActor, StoreEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u64, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl StoreEntity for Note {
///     type Id = u64;
///     type Fields = String;
///     type Error = NoteError;
///
///     fn from_fields(id: u64, text: String) -> Result<Self, Self::Error> { Ok(Self { id, text }) }
///     fn id(&self) -> &u64 { &self.id }
///     async fn on_update(&mut self, text: String) -> Result<(), Self::Error> {
///         self.text = text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run());
///
///     let note = client.create("hello".to_string()).await.unwrap();
///     assert_eq!(note.id, 1);
/// }
/// ```
///
/// # Implementation Details
///
/// Entities live in a `BTreeMap` keyed by id. Ids come from a `u64` counter that only
/// ever grows, so listing in key order is listing in creation order, and a deleted id is
/// never reissued.
///
/// * **Create**: allocate an id, build the entity with `from_fields`, run `on_create`,
///   insert, reply with the stored entity.
/// * **Update**: clone the stored entity, run `on_update` on the clone, and swap it in only
///   on success.
/// * **Delete**: run `on_delete`, then remove.
pub struct ResourceActor<T: StoreEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u64,
}

impl<T: StoreEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Person" instead of "person_sync::model::person::Person")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { fields, respond_to } => {
                    debug!(entity_type, ?fields, "Create");
                    let result = self.create(fields).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    fields,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?fields, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut draft = current.clone();
                    if let Err(e) = draft.on_update(fields).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), draft.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(draft));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    if let Err(e) = item.on_delete().await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, fields: T::Fields) -> Result<T, FrameworkError> {
        let id = T::Id::from(self.next_id);

        let mut item = T::from_fields(id.clone(), fields).map_err(|e| {
            warn!(error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        item.on_create().await.map_err(|e| {
            warn!(error = %e, "on_create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        // Only a committed create consumes an id.
        self.next_id += 1;
        self.store.insert(id.clone(), item.clone());
        info!(%id, size = self.store.len(), "Created");
        Ok(item)
    }
}
