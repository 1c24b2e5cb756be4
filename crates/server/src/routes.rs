use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::todo::{repository::TodoRepository, TodoService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod todo_items;

/// Item routes are served under each of these prefixes. The second one is the
/// path the original web client calls.
pub const ITEM_PREFIXES: [&str; 2] = ["/items", "/api/TodoItems"];

#[derive(Clone)]
pub struct ServerState {
    pub todos: Arc<TodoService<dyn TodoRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { todos: Arc::new(TodoService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    for prefix in ITEM_PREFIXES {
        app = app.nest(prefix, todo_items::routes());
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request, method and path included
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
