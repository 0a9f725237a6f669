//! # Person Controller
//!
//! Validates inbound requests, translates them into store calls and maps the outcome to an
//! [`ApiResponse`]. The controller is transport-neutral: the axum routes in
//! [`server::routes`](crate::server::routes) and the in-process
//! [`LoopbackTransport`](crate::client::transport::LoopbackTransport) both hand it raw path
//! ids and raw body bytes, so both see identical status/body pairs.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | list / get / update succeeded | 200 with the stored person |
//! | create succeeded | 201 with the stored person |
//! | delete succeeded | 204, no body |
//! | unknown id, or a path id that is not an id | 404 |
//! | body is not valid person JSON, or fails validation | 400 |
//! | store unreachable | 503 |
//!
//! Invalid input is answered before the store is touched.

use crate::clients::PersonClient;
use crate::model::{normalize_name, PersonFields, PersonId};
use crate::person_store::PersonError;
use axum::http::StatusCode;
use chrono::NaiveDate;
use resource_actor::ActorClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

/// A status code plus an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self {
                status,
                body: Some(body),
            },
            Err(e) => Self::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(json!({ "error": message.into() })),
        }
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    /// The `error` message of an error body, if there is one.
    pub fn error_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }
}

/// The JSON shape accepted on create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonBody {
    #[serde(default)]
    id: Option<PersonId>,
    name: String,
    age: u32,
    is_active: bool,
    #[serde(default)]
    created_at: Option<NaiveDate>,
}

impl PersonBody {
    fn parse(body: &[u8]) -> Result<Self, String> {
        let parsed: PersonBody = serde_json::from_slice(body).map_err(|e| e.to_string())?;
        if normalize_name(&parsed.name).is_none() {
            return Err("name must not be empty".into());
        }
        Ok(parsed)
    }

    fn into_fields(self) -> PersonFields {
        PersonFields {
            name: self.name,
            age: self.age,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Handles person requests on top of a [`PersonClient`].
#[derive(Clone)]
pub struct PersonController {
    client: PersonClient,
}

impl PersonController {
    pub fn new(client: PersonClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ApiResponse {
        match self.client.list().await {
            Ok(persons) => ApiResponse::json(StatusCode::OK, &persons),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> ApiResponse {
        let Some(id) = parse_id(raw_id) else {
            return not_found(raw_id);
        };
        match self.client.get(id).await {
            Ok(Some(person)) => ApiResponse::json(StatusCode::OK, &person),
            Ok(None) => not_found(raw_id),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &[u8]) -> ApiResponse {
        let parsed = match PersonBody::parse(body) {
            Ok(parsed) => parsed,
            Err(message) => return bad_request(message),
        };
        if let Some(id) = parsed.id {
            return bad_request(format!("id must not be supplied on create, got {id}"));
        }

        match self.client.create_person(parsed.into_fields()).await {
            Ok(person) => ApiResponse::json(StatusCode::CREATED, &person),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn update(&self, raw_id: &str, body: &[u8]) -> ApiResponse {
        let Some(id) = parse_id(raw_id) else {
            return not_found(raw_id);
        };
        let parsed = match PersonBody::parse(body) {
            Ok(parsed) => parsed,
            Err(message) => return bad_request(message),
        };
        if let Some(body_id) = parsed.id {
            if body_id != id {
                return bad_request(format!("body id {body_id} does not match path id {id}"));
            }
        }
        if parsed.created_at.is_none() {
            return bad_request("createdAt is required on update");
        }

        match self.client.update_person(id, parsed.into_fields()).await {
            Ok(person) => ApiResponse::json(StatusCode::OK, &person),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> ApiResponse {
        let Some(id) = parse_id(raw_id) else {
            return not_found(raw_id);
        };
        match self.client.delete(id).await {
            Ok(()) => ApiResponse::no_content(),
            Err(e) => failure(e),
        }
    }
}

fn parse_id(raw_id: &str) -> Option<PersonId> {
    raw_id.parse().ok()
}

fn not_found(raw_id: &str) -> ApiResponse {
    debug!(id = raw_id, "Not found");
    ApiResponse::error(StatusCode::NOT_FOUND, format!("Person not found: {raw_id}"))
}

fn bad_request(message: impl Into<String>) -> ApiResponse {
    let message = message.into();
    debug!(%message, "Rejected request");
    ApiResponse::error(StatusCode::BAD_REQUEST, message)
}

fn failure(e: PersonError) -> ApiResponse {
    match e {
        PersonError::NotFound(id) => not_found(&id),
        PersonError::Validation(message) => bad_request(message),
        PersonError::Unavailable(message) => {
            warn!(error = %message, "Store unavailable");
            ApiResponse::error(StatusCode::SERVICE_UNAVAILABLE, "person store unavailable")
        }
    }
}
