use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a [`Person`].
///
/// Serialized as a bare JSON number. Ids are handed out by the store from a counter
/// that never goes backwards, so an id is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for PersonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A person, the one resource this system manages.
///
/// # Actor Framework
/// This struct implements the [`StoreEntity`](resource_actor::StoreEntity) trait (see
/// [`person_store`](crate::person_store)), so the canonical copy lives inside a
/// [`ResourceActor`](resource_actor::ResourceActor). Every other copy, including the one a
/// client view renders, is a projection of that one.
///
/// ```json
/// { "id": 1, "name": "Ana", "age": 30, "isActive": true, "createdAt": "2024-01-05" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: u32,
    pub is_active: bool,
    pub created_at: NaiveDate,
}

impl Person {
    /// The key under which this person is addressable in a client document.
    pub fn dom_key(&self) -> String {
        dom_key(self.id)
    }

    /// Builds the full-replace payload carrying this person's current values.
    pub fn fields(&self) -> PersonFields {
        PersonFields {
            name: self.name.clone(),
            age: self.age,
            is_active: self.is_active,
            created_at: Some(self.created_at),
        }
    }

    /// Combines an id with a set of fields into a full record.
    ///
    /// Used by the client when it submits an edit; `created_at` falls back to
    /// `current` when the fields leave it open.
    pub fn with_fields(id: PersonId, fields: PersonFields, current: NaiveDate) -> Self {
        Self {
            id,
            name: fields.name,
            age: fields.age,
            is_active: fields.is_active,
            created_at: fields.created_at.unwrap_or(current),
        }
    }
}

/// The document key for a person id: `resource-<id>`.
pub fn dom_key(id: PersonId) -> String {
    format!("resource-{id}")
}

/// Mutable fields of a person, used for both create and full-replace update.
///
/// A missing `created_at` means "today" on create and "unchanged" on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFields {
    pub name: String,
    pub age: u32,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

impl PersonFields {
    pub fn new(name: impl Into<String>, age: u32, is_active: bool) -> Self {
        Self {
            name: name.into(),
            age,
            is_active,
            created_at: None,
        }
    }

    pub fn created_at(mut self, date: NaiveDate) -> Self {
        self.created_at = Some(date);
        self
    }
}

/// Canonical form of a person's name, or `None` when it is blank.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
