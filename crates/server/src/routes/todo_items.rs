use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use service::todo::domain::{CreateOutcome, CreateTodoInput, TodoItem, UpdateOutcome, UpdateTodoInput};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::{ApiError, DESCRIPTION_REQUIRED, DUPLICATE_DESCRIPTION, ID_MISMATCH};
use crate::routes::ServerState;

/// Request body for create and update. Every field is optional on the wire so
/// that missing values reach the explicit checks below instead of a 422.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub version: Option<i32>,
}

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_item).put(update))
}

/// Lists all incomplete items
#[utoipa::path(
    get, path = "/items", tag = "items",
    responses(
        (status = 200, description = "Incomplete items", body = [crate::openapi::TodoItemDoc]),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    match state.todos.list_incomplete().await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            error!(err = %e, code = e.code(), "error retrieving todo items");
            Err(ApiError::internal())
        }
    }
}

/// Fetches one item by id
#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = Uuid, Path, description = "Todo item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TodoItemDoc),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn get_item(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<TodoItem>, ApiError> {
    match state.todos.get_by_id(id).await {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => {
            warn!(item_id = %id, "todo item not found");
            Err(ApiError::not_found())
        }
        Err(e) => {
            error!(item_id = %id, err = %e, code = e.code(), "error retrieving todo item");
            Err(ApiError::internal())
        }
    }
}

/// Creates an item; answers 201 with a Location pointing at the new item
#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::TodoItemPayloadDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TodoItemDoc),
        (status = 400, description = "Description is required", body = String),
        (status = 409, description = "Duplicate incomplete description", body = String),
        (status = 500, description = "Internal server error", body = String)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<TodoItemPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoItem>), ApiError> {
    let description = match payload.description.as_deref() {
        Some(d) if !d.is_empty() => d.trim().to_string(),
        _ => return Err(ApiError::bad_request(DESCRIPTION_REQUIRED)),
    };

    let input = CreateTodoInput { id: payload.id, description, is_completed: payload.is_completed };
    match state.todos.create(input).await {
        Ok(CreateOutcome::Created(item)) => {
            let location = format!("{}/{}", uri.path().trim_end_matches('/'), item.id);
            info!(item_id = %item.id, %location, "created todo item");
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
        }
        Ok(CreateOutcome::EmptyDescription) => Err(ApiError::bad_request(DESCRIPTION_REQUIRED)),
        Ok(CreateOutcome::Duplicate) => Err(ApiError::conflict(DUPLICATE_DESCRIPTION)),
        Err(e) => {
            error!(err = %e, code = e.code(), "error creating new todo item");
            Err(ApiError::internal())
        }
    }
}

/// Replaces an item; the path id must equal the body id
#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = Uuid, Path, description = "Todo item ID")),
    request_body = crate::openapi::TodoItemPayloadDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "ID mismatch or Description is required", body = String),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Concurrent modification or internal error", body = String)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TodoItemPayload>,
) -> Result<StatusCode, ApiError> {
    if payload.id != Some(id) {
        return Err(ApiError::bad_request(ID_MISMATCH));
    }

    let input = UpdateTodoInput {
        id,
        description: payload.description.unwrap_or_default().trim().to_string(),
        is_completed: payload.is_completed,
        version: payload.version,
    };
    match state.todos.update(id, input).await {
        Ok(UpdateOutcome::Updated) => Ok(StatusCode::NO_CONTENT),
        Ok(UpdateOutcome::NotFound) => Err(ApiError::not_found()),
        Ok(UpdateOutcome::EmptyDescription) => Err(ApiError::bad_request(DESCRIPTION_REQUIRED)),
        Ok(UpdateOutcome::Conflict) => {
            error!(item_id = %id, version = ?payload.version, "todo item was modified concurrently");
            Err(ApiError::internal())
        }
        Err(e) => {
            error!(item_id = %id, err = %e, code = e.code(), "error updating todo item");
            Err(ApiError::internal())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_accepts_camel_case_and_missing_fields() {
        let p: TodoItemPayload = serde_json::from_str(r#"{"description":"a","isCompleted":true}"#).unwrap();
        assert_eq!(p.description.as_deref(), Some("a"));
        assert!(p.is_completed);
        assert!(p.id.is_none());
        assert!(p.version.is_none());

        let p: TodoItemPayload = serde_json::from_str("{}").unwrap();
        assert!(p.description.is_none());
        assert!(!p.is_completed);
    }
}
