//! axum routing for the person collection.

use crate::controller::{ApiResponse, PersonController};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

type Controller = State<Arc<PersonController>>;

/// Mounts the collection at `prefix` and single persons at `prefix/:id`.
pub fn router(controller: Arc<PersonController>, prefix: &str) -> Router {
    Router::new()
        .route(prefix, get(list_persons).post(create_person))
        .route(
            &format!("{prefix}/:id"),
            get(get_person).put(update_person).delete(delete_person),
        )
        .with_state(controller)
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

async fn list_persons(State(controller): Controller) -> ApiResponse {
    controller.list().await
}

async fn get_person(State(controller): Controller, Path(id): Path<String>) -> ApiResponse {
    controller.get(&id).await
}

// Bodies are taken as raw bytes so malformed JSON reaches the controller and gets its 400.
async fn create_person(State(controller): Controller, body: Bytes) -> ApiResponse {
    controller.create(&body).await
}

async fn update_person(
    State(controller): Controller,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse {
    controller.update(&id, &body).await
}

async fn delete_person(State(controller): Controller, Path(id): Path<String>) -> ApiResponse {
    controller.delete(&id).await
}
