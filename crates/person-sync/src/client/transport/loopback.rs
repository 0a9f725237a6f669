//! In-process transport that calls the controller directly.

use super::{PersonTransport, TransportError};
use crate::controller::{ApiResponse, PersonController};
use crate::model::{Person, PersonFields, PersonId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Sends requests straight to a [`PersonController`] without a socket.
///
/// Bodies are still serialized to JSON bytes and parsed by the controller, so the
/// client sees exactly the status codes and bodies the HTTP server would produce.
#[derive(Clone)]
pub struct LoopbackTransport {
    controller: Arc<PersonController>,
}

impl LoopbackTransport {
    pub fn new(controller: Arc<PersonController>) -> Self {
        Self { controller }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(value).map_err(|e| TransportError::Encode(e.to_string()))
}

fn check(response: ApiResponse) -> Result<Option<serde_json::Value>, TransportError> {
    if response.status.is_success() {
        return Ok(response.body);
    }
    let message = response
        .error_message()
        .map(str::to_string)
        .unwrap_or_else(|| response.status.to_string());
    Err(TransportError::Rejected {
        status: response.status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, TransportError> {
    let body = check(response)?.ok_or_else(|| TransportError::Decode("empty body".into()))?;
    serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl PersonTransport for LoopbackTransport {
    async fn list(&self) -> Result<Vec<Person>, TransportError> {
        decode(self.controller.list().await)
    }

    async fn get(&self, id: PersonId) -> Result<Person, TransportError> {
        decode(self.controller.get(&id.to_string()).await)
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person, TransportError> {
        let body = encode(fields)?;
        decode(self.controller.create(&body).await)
    }

    async fn update(&self, person: &Person) -> Result<Person, TransportError> {
        let body = encode(person)?;
        decode(self.controller.update(&person.id.to_string(), &body).await)
    }

    async fn delete(&self, id: PersonId) -> Result<(), TransportError> {
        check(self.controller.delete(&id.to_string()).await)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person_store;

    fn transport() -> LoopbackTransport {
        let (actor, client) = person_store::new(8);
        tokio::spawn(actor.run());
        LoopbackTransport::new(Arc::new(PersonController::new(client)))
    }

    #[tokio::test]
    async fn statuses_match_the_controller() {
        let transport = transport();

        let created = transport
            .create(&PersonFields::new("Ana", 30, true))
            .await
            .unwrap();
        assert_eq!(transport.get(created.id).await.unwrap(), created);

        transport.delete(created.id).await.unwrap();
        let missing = transport.delete(created.id).await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn validation_failures_surface_as_rejections() {
        let transport = transport();
        let err = transport
            .create(&PersonFields::new(" ", 30, true))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Rejected {
                status: 400,
                message: "name must not be empty".into()
            }
        );
    }
}
