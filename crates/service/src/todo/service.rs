use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{CreateOutcome, CreateTodoInput, NewTodoItem, TodoItem, UpdateOutcome, UpdateTodoInput};
use super::errors::TodoError;
use super::repository::TodoRepository;

/// Todo business service independent of web framework.
///
/// Reads go straight to the repository on every call; nothing is cached between calls.
pub struct TodoService<R: TodoRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TodoRepository + ?Sized> TodoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All items not yet completed. An empty list is a normal answer.
    #[instrument(skip(self))]
    pub async fn list_incomplete(&self) -> Result<Vec<TodoItem>, TodoError> {
        let items = self.repo.list_incomplete().await?;
        debug!(count = items.len(), "listed incomplete items");
        Ok(items)
    }

    /// `Ok(None)` when no item has this id.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TodoItem>, TodoError> {
        self.repo.find_by_id(id).await
    }

    /// Create an item unless an incomplete one already has the same trimmed description.
    ///
    /// The comparison is exact and case-sensitive. The check reads the incomplete set
    /// and then inserts; two concurrent creations of the same text can both succeed.
    ///
    /// # Examples
    /// ```
    /// use service::todo::{TodoService, repository::memory::InMemoryTodoRepository};
    /// use service::todo::domain::{CreateOutcome, CreateTodoInput};
    /// use std::sync::Arc;
    /// let svc = TodoService::new(Arc::new(InMemoryTodoRepository::new()));
    /// let input = CreateTodoInput { description: "  Buy milk ".into(), ..Default::default() };
    /// let CreateOutcome::Created(item) = tokio_test::block_on(svc.create(input.clone())).unwrap() else { panic!() };
    /// assert_eq!(item.description, "Buy milk");
    /// assert!(!item.is_completed);
    /// assert_eq!(tokio_test::block_on(svc.create(input)).unwrap(), CreateOutcome::Duplicate);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateTodoInput) -> Result<CreateOutcome, TodoError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Ok(CreateOutcome::EmptyDescription);
        }

        let incomplete = self.repo.list_incomplete().await?;
        if incomplete.iter().any(|item| item.description.trim() == description) {
            debug!(%description, "incomplete item with same description exists");
            return Ok(CreateOutcome::Duplicate);
        }

        let id = match input.id {
            Some(id) if !id.is_nil() => id,
            _ => Uuid::new_v4(),
        };
        let created = self
            .repo
            .insert(NewTodoItem { id, description: description.to_string(), is_completed: input.is_completed })
            .await?;
        info!(item_id = %created.id, "todo_item_created");
        Ok(CreateOutcome::Created(created))
    }

    /// Replace an item. The caller has already checked that `id == input.id`.
    ///
    /// The write is conditioned on the version token carried by `input`. Only when it
    /// does not land is existence checked, to tell a vanished row from a concurrent edit.
    #[instrument(skip(self, input), fields(item_id = %id, version = ?input.version))]
    pub async fn update(&self, id: Uuid, input: UpdateTodoInput) -> Result<UpdateOutcome, TodoError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Ok(UpdateOutcome::EmptyDescription);
        }
        let change = UpdateTodoInput { id, description: description.to_string(), ..input };

        if self.repo.update_if_unchanged(&change).await? {
            info!("todo_item_updated");
            return Ok(UpdateOutcome::Updated);
        }

        if self.repo.exists(id).await? {
            warn!("todo_item_update_conflict");
            Ok(UpdateOutcome::Conflict)
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }
}
