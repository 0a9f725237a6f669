//! # Generic Messages
//!
//! The request type exchanged between [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the store contract: list the collection, read one entity,
/// create one (the reply carries the canonical entity including its new id), replace
/// its fields, or delete it. Every reply to a write is the stored state, never the
/// request payload.
#[derive(Debug)]
pub enum ResourceRequest<T: StoreEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        fields: T::Fields,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        fields: T::Fields,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
