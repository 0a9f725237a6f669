//! Transport layer abstraction for person requests.
//!
//! [`PersonTransport`] is the only way the client reaches the server. Implementations:
//!
//! - [`HttpTransport`] - JSON over HTTP with `reqwest`
//! - [`LoopbackTransport`] - calls a [`PersonController`](crate::controller::PersonController)
//!   in-process, with the same status/body semantics as HTTP
//! - [`MockTransport`] - scripted replies for tests

mod http;
mod loopback;
mod mock;

pub use http::HttpTransport;
pub use loopback::LoopbackTransport;
pub use mock::{MockRequest, MockTransport};

use crate::model::{Person, PersonFields, PersonId};
use async_trait::async_trait;
use thiserror::Error;

/// Why a request did not produce a confirmed result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// The server answered successfully but the body is not what was expected.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Builds a `Rejected` error from a status and a raw error body.
    pub fn rejected(status: u16, body: &str) -> Self {
        TransportError::Rejected {
            status,
            message: error_message(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Extracts `error` from a `{"error": "..."}` body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// A person transport issues one request per call and returns the server's confirmed
/// result. Every successful reply is the server's canonical copy.
#[async_trait]
pub trait PersonTransport: Send + Sync {
    /// Fetches the whole collection.
    async fn list(&self) -> Result<Vec<Person>, TransportError>;

    /// Fetches one person.
    async fn get(&self, id: PersonId) -> Result<Person, TransportError>;

    /// Creates a person; the server assigns the id.
    async fn create(&self, fields: &PersonFields) -> Result<Person, TransportError>;

    /// Replaces every field of an existing person.
    async fn update(&self, person: &Person) -> Result<Person, TransportError>;

    /// Deletes a person.
    async fn delete(&self, id: PersonId) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reads_error_bodies() {
        let err = TransportError::rejected(400, r#"{"error":"name must not be empty"}"#);
        assert_eq!(
            err,
            TransportError::Rejected {
                status: 400,
                message: "name must not be empty".into()
            }
        );
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }

    #[test]
    fn rejected_falls_back_to_raw_text() {
        let err = TransportError::rejected(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "server rejected request with status 502: Bad Gateway");
        assert_eq!(TransportError::Network("refused".into()).status(), None);
    }
}
