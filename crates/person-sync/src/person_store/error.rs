//! Error types for the Person store.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during person operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersonError {
    /// The requested person was not found.
    #[error("Person not found: {0}")]
    NotFound(String),

    /// The person data provided is invalid.
    #[error("Person validation error: {0}")]
    Validation(String),

    /// The store actor could not be reached.
    #[error("Person store unavailable: {0}")]
    Unavailable(String),
}

impl From<FrameworkError> for PersonError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => PersonError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<PersonError>() {
                Ok(person_error) => *person_error,
                Err(other) => PersonError::Validation(other.to_string()),
            },
            unavailable @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                PersonError::Unavailable(unavailable.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_errors_are_recovered() {
        let boxed = FrameworkError::EntityError(Box::new(PersonError::Validation(
            "name must not be empty".into(),
        )));
        assert_eq!(
            PersonError::from(boxed),
            PersonError::Validation("name must not be empty".into())
        );
    }

    #[test]
    fn closed_actor_is_unavailable() {
        assert!(matches!(
            PersonError::from(FrameworkError::ActorClosed),
            PersonError::Unavailable(_)
        ));
    }
}
