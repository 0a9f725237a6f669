//! Error types for the client side.

use crate::client::registry::ViewState;
use crate::client::transport::TransportError;
use crate::model::PersonId;
use thiserror::Error;

/// A form value that cannot be turned into person fields. Values are never coerced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("age must be a non-negative whole number, got {0:?}")]
    InvalidAge(String),

    #[error("date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),

    #[error("form input {0} is missing")]
    MissingInput(String),
}

/// Errors returned by [`ClientSyncAgent`](crate::client::ClientSyncAgent) operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] FormError),

    #[error("no view for person {0}")]
    UnknownView(PersonId),

    #[error("cannot {action} person {id} while it is {state:?}")]
    InvalidState {
        action: &'static str,
        id: PersonId,
        state: ViewState,
    },

    #[error("cannot {0} while no create form is open")]
    NoDraft(&'static str),

    #[error("a create form is already open")]
    DraftOpen,
}
