//! # Person Client
//!
//! Provides a high-level API for interacting with the `Person` actor.
//! It wraps a `ResourceClient<Person>` and exposes domain-specific methods.
use crate::model::{Person, PersonFields, PersonId};
use crate::person_store::PersonError;
use async_trait::async_trait;
use resource_actor::ActorClient;
use resource_actor::{FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Person actor.
#[derive(Clone)]
pub struct PersonClient {
    inner: ResourceClient<Person>,
}

impl PersonClient {
    pub fn new(inner: ResourceClient<Person>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Person> for PersonClient {
    type Error = PersonError;

    fn inner(&self) -> &ResourceClient<Person> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PersonError::from(e)
    }
}

impl PersonClient {
    #[instrument(skip(self))]
    pub async fn create_person(&self, fields: PersonFields) -> Result<Person, PersonError> {
        debug!("Sending request");
        self.inner.create(fields).await.map_err(PersonError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_person(
        &self,
        id: PersonId,
        fields: PersonFields,
    ) -> Result<Person, PersonError> {
        debug!("Sending request");
        self.inner.update(id, fields).await.map_err(PersonError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use resource_actor::mock::{create_mock_client, expect_create, MockClient};

    fn ana() -> Person {
        Person {
            id: PersonId(1),
            name: "Ana".into(),
            age: 30,
            is_active: true,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_forwards_fields_unchanged() {
        let (inner, mut receiver) = create_mock_client::<Person>(4);
        let client = PersonClient::new(inner);

        let task = tokio::spawn(async move {
            client
                .create_person(PersonFields::new("Ana", 30, true))
                .await
        });

        let (fields, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(fields, PersonFields::new("Ana", 30, true));
        responder.send(Ok(ana())).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), ana());
    }

    #[tokio::test]
    async fn entity_rejection_maps_to_validation() {
        let mut mock = MockClient::<Person>::new();
        mock.expect_update(PersonId(1))
            .return_err(FrameworkError::EntityError(Box::new(PersonError::Validation(
                "name must not be empty".into(),
            ))));

        let client = PersonClient::new(mock.client());
        let result = client
            .update_person(PersonId(1), PersonFields::new("", 30, true))
            .await;

        assert_eq!(
            result,
            Err(PersonError::Validation("name must not be empty".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn provided_methods_map_errors() {
        let mut mock = MockClient::<Person>::new();
        mock.expect_delete(PersonId(9))
            .return_err(FrameworkError::NotFound("9".into()));
        mock.expect_list().return_err(FrameworkError::ActorDropped);

        let client = PersonClient::new(mock.client());
        assert_eq!(
            client.delete(PersonId(9)).await,
            Err(PersonError::NotFound("9".into()))
        );
        assert!(matches!(
            client.list().await,
            Err(PersonError::Unavailable(_))
        ));
        mock.verify();
    }
}
