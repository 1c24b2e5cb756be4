use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task as seen by clients. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
    /// Concurrency token; echo it back on update to refuse stale writes.
    pub version: i32,
}

impl From<models::todo_item::Model> for TodoItem {
    fn from(m: models::todo_item::Model) -> Self {
        Self { id: m.id, description: m.description, is_completed: m.is_completed, version: m.version }
    }
}

/// Creation input
#[derive(Debug, Clone, Default)]
pub struct CreateTodoInput {
    /// Caller-chosen id; `None` or the nil UUID means "assign one".
    pub id: Option<Uuid>,
    pub description: String,
    pub is_completed: bool,
}

/// Row handed to storage on insert, identity already assigned and description trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoItem {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
}

/// Full replacement of an existing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoInput {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
    /// Version the writer last read. `None` skips the staleness check.
    pub version: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(TodoItem),
    /// Description was empty once trimmed.
    EmptyDescription,
    /// An incomplete item already carries this description.
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The row exists but changed since the writer read it.
    Conflict,
    EmptyDescription,
}
