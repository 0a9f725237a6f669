//! # Framework Errors
//!
//! Errors raised by the store actor and its clients. Entity-level failures are carried
//! boxed so a typed client can downcast them back to the entity's own error type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = FrameworkError::NotFound("42".into());
        assert_eq!(err.to_string(), "Item not found: 42");
    }
}
