//! Migrator for the todo list schema.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_todo_item;
mod m20240601_000002_add_indexes;
mod m20240601_000003_drop_description_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_todo_item::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000002_add_indexes::Migration),
            Box::new(m20240601_000003_drop_description_index::Migration),
        ]
    }
}
