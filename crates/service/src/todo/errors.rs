use thiserror::Error;

/// Failures of the todo workflows. Expected outcomes (missing item, duplicate,
/// conflict) are not errors; see [`super::domain::CreateOutcome`] and
/// [`super::domain::UpdateOutcome`].
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("repository error: {0}")]
    Repository(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl TodoError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            TodoError::Repository(_) => 2200,
            TodoError::Model(models::errors::ModelError::Validation(_)) => 2001,
            TodoError::Model(models::errors::ModelError::Db(_)) => 2201,
        }
    }
}
