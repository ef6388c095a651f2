//! Phase repository.

use std::sync::Arc;

use crate::entities::{Phase, phase};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tanihub_common::{AppError, AppResult};

/// Phase repository for database operations.
#[derive(Clone)]
pub struct PhaseRepository {
    db: Arc<DatabaseConnection>,
}

impl PhaseRepository {
    /// Create a new phase repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a phase by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<phase::Model>> {
        Phase::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a phase by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<phase::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("phase {id}")))
    }

    /// List a project's phases in sequence order.
    pub async fn find_by_project(&self, project_id: &str) -> AppResult<Vec<phase::Model>> {
        Phase::find()
            .filter(phase::Column::ProjectId.eq(project_id))
            .order_by_asc(phase::Column::Sequence)
            .order_by_asc(phase::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new phase.
    pub async fn create(&self, model: phase::ActiveModel) -> AppResult<phase::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a phase.
    pub async fn update(&self, model: phase::ActiveModel) -> AppResult<phase::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a phase.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Phase::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
