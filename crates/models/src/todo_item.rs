//! `todo_item` entity and the row-level operations the service layer builds on.

use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_completed: bool,
    /// Bumped by every successful conditional update.
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const INITIAL_VERSION: i32 = 1;

/// Trim a description and reject it when nothing is left.
pub fn normalize_description(d: &str) -> Result<String, errors::ModelError> {
    let trimmed = d.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("description required".into()));
    }
    Ok(trimmed.to_string())
}

/// All rows with `is_completed = false`, in whatever order the database returns them.
pub async fn find_incomplete(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find().filter(Column::IsCompleted.eq(false)).all(db).await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let row = Entity::find_by_id(id).one(db).await?;
    Ok(row)
}

pub async fn exists(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    Ok(find(db, id).await?.is_some())
}

pub async fn create(
    db: &DatabaseConnection,
    id: Uuid,
    description: &str,
    is_completed: bool,
) -> Result<Model, errors::ModelError> {
    let description = normalize_description(description)?;
    let am = ActiveModel {
        id: Set(id),
        description: Set(description),
        is_completed: Set(is_completed),
        version: Set(INITIAL_VERSION),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Replace description and completion state of row `id`, bumping its version.
///
/// With `expected_version` the write only applies while the stored version still
/// matches; without it only the id is matched. Returns whether a row was written.
pub async fn update_if_version(
    db: &DatabaseConnection,
    id: Uuid,
    description: &str,
    is_completed: bool,
    expected_version: Option<i32>,
) -> Result<bool, errors::ModelError> {
    let description = normalize_description(description)?;
    let mut stmt = Entity::update_many()
        .col_expr(Column::Description, Expr::value(description))
        .col_expr(Column::IsCompleted, Expr::value(is_completed))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id));
    if let Some(v) = expected_version {
        stmt = stmt.filter(Column::Version.eq(v));
    }
    let res = stmt.exec(db).await?;
    Ok(res.rows_affected > 0)
}
