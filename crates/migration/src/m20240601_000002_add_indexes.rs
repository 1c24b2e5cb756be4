use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing and the duplicate check both read the incomplete set. Descriptions
        // are unbounded text and stay out of btree indexes.
        manager
            .create_index(
                Index::create()
                    .name("idx_todo_item_is_completed")
                    .table(TodoItem::Table)
                    .col(TodoItem::IsCompleted)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_todo_item_is_completed").table(TodoItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TodoItem {
    Table,
    IsCompleted,
}
