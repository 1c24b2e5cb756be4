use sea_orm_migration::prelude::*;

/// Schemas migrated by an earlier build carry a btree index over
/// `(is_completed, description)`. Postgres refuses index rows above one page,
/// which made long descriptions unstorable.
#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX: &str = "idx_todo_item_completed_description";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX).table(TodoItem::Table).if_exists().to_owned())
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}

#[derive(DeriveIden)]
enum TodoItem {
    Table,
}
