//! [`StoreEntity`] implementation for [`Person`].

use super::PersonError;
use crate::model::{normalize_name, Person, PersonFields, PersonId};
use async_trait::async_trait;
use chrono::Local;
use resource_actor::StoreEntity;

#[async_trait]
impl StoreEntity for Person {
    type Id = PersonId;
    type Fields = PersonFields;
    type Error = PersonError;

    /// Builds a new person. A missing `created_at` is fixed to today's date.
    fn from_fields(id: PersonId, fields: PersonFields) -> Result<Self, Self::Error> {
        let name = normalize_name(&fields.name)
            .ok_or_else(|| PersonError::Validation("name must not be empty".into()))?;
        Ok(Self {
            id,
            name,
            age: fields.age,
            is_active: fields.is_active,
            created_at: fields
                .created_at
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    fn id(&self) -> &PersonId {
        &self.id
    }

    /// Replaces every mutable field. A missing `created_at` keeps the stored date.
    async fn on_update(&mut self, fields: PersonFields) -> Result<(), Self::Error> {
        self.name = normalize_name(&fields.name)
            .ok_or_else(|| PersonError::Validation("name must not be empty".into()))?;
        self.age = fields.age;
        self.is_active = fields.is_active;
        if let Some(date) = fields.created_at {
            self.created_at = date;
        }
        Ok(())
    }
}
