use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TodoItemDoc {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
    pub version: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TodoItemPayloadDoc {
    /// Required on update and must equal the path id; optional on create.
    pub id: Option<Uuid>,
    pub description: String,
    pub is_completed: Option<bool>,
    /// Last version read; omit to skip the staleness check.
    pub version: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::todo_items::list,
        crate::routes::todo_items::get_item,
        crate::routes::todo_items::create,
        crate::routes::todo_items::update,
    ),
    components(
        schemas(
            HealthResponse,
            TodoItemDoc,
            TodoItemPayloadDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_item_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/items"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
