use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::todo::domain::{NewTodoItem, TodoItem, UpdateTodoInput};
use crate::todo::errors::TodoError;
use crate::todo::repository::TodoRepository;
use models::todo_item;

pub struct SeaOrmTodoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTodoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl TodoRepository for SeaOrmTodoRepository {
    async fn list_incomplete(&self) -> Result<Vec<TodoItem>, TodoError> {
        let rows = todo_item::find_incomplete(&self.db).await?;
        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoItem>, TodoError> {
        let row = todo_item::find(&self.db, id).await?;
        Ok(row.map(TodoItem::from))
    }

    async fn insert(&self, item: NewTodoItem) -> Result<TodoItem, TodoError> {
        let created = todo_item::create(&self.db, item.id, &item.description, item.is_completed).await?;
        Ok(created.into())
    }

    async fn update_if_unchanged(&self, change: &UpdateTodoInput) -> Result<bool, TodoError> {
        let written = todo_item::update_if_version(
            &self.db,
            change.id,
            &change.description,
            change.is_completed,
            change.version,
        )
        .await?;
        Ok(written)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, TodoError> {
        Ok(todo_item::exists(&self.db, id).await?)
    }
}
