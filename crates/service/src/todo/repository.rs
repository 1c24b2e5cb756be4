use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewTodoItem, TodoItem, UpdateTodoInput};
use super::errors::TodoError;

/// Repository abstraction for todo persistence.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list_incomplete(&self) -> Result<Vec<TodoItem>, TodoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoItem>, TodoError>;
    async fn insert(&self, item: NewTodoItem) -> Result<TodoItem, TodoError>;

    /// Replace the row named by `change.id`. When `change.version` is set the
    /// write only happens if the stored version still equals it. Returns `false`
    /// when nothing was written.
    async fn update_if_unchanged(&self, change: &UpdateTodoInput) -> Result<bool, TodoError>;

    async fn exists(&self, id: Uuid) -> Result<bool, TodoError>;
}

/// Process-local repository, used by tests and by `STORAGE=memory` runs.
pub mod memory {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryTodoRepository {
        // insertion order doubles as listing order
        items: RwLock<Vec<TodoItem>>,
    }

    impl InMemoryTodoRepository {
        pub fn new() -> Self { Self::default() }

        /// Drop a row outright. There is no delete operation in the service; this
        /// lets callers simulate rows vanishing underneath a writer.
        pub async fn remove(&self, id: Uuid) -> bool {
            let mut items = self.items.write().await;
            let before = items.len();
            items.retain(|i| i.id != id);
            items.len() != before
        }

        pub async fn len(&self) -> usize { self.items.read().await.len() }

        pub async fn is_empty(&self) -> bool { self.items.read().await.is_empty() }
    }

    #[async_trait]
    impl TodoRepository for InMemoryTodoRepository {
        async fn list_incomplete(&self) -> Result<Vec<TodoItem>, TodoError> {
            let items = self.items.read().await;
            Ok(items.iter().filter(|i| !i.is_completed).cloned().collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoItem>, TodoError> {
            let items = self.items.read().await;
            Ok(items.iter().find(|i| i.id == id).cloned())
        }

        async fn insert(&self, item: NewTodoItem) -> Result<TodoItem, TodoError> {
            let mut items = self.items.write().await;
            if items.iter().any(|i| i.id == item.id) {
                return Err(TodoError::Repository(format!("duplicate key: todo_item {}", item.id)));
            }
            let stored = TodoItem {
                id: item.id,
                description: item.description,
                is_completed: item.is_completed,
                version: models::todo_item::INITIAL_VERSION,
            };
            items.push(stored.clone());
            Ok(stored)
        }

        async fn update_if_unchanged(&self, change: &UpdateTodoInput) -> Result<bool, TodoError> {
            let mut items = self.items.write().await;
            let Some(row) = items.iter_mut().find(|i| i.id == change.id) else { return Ok(false); };
            if matches!(change.version, Some(v) if v != row.version) {
                return Ok(false);
            }
            row.description = change.description.clone();
            row.is_completed = change.is_completed;
            row.version += 1;
            Ok(true)
        }

        async fn exists(&self, id: Uuid) -> Result<bool, TodoError> {
            let items = self.items.read().await;
            Ok(items.iter().any(|i| i.id == id))
        }
    }
}
