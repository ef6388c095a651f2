//! Project repository.

use std::sync::Arc;

use crate::entities::{Project, project};
use crate::repositories::filter::FilterCriteria;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tanihub_common::{AppError, AppResult};

/// Project repository for database operations.
#[derive(Clone)]
pub struct ProjectRepository {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepository {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<project::Model>> {
        Project::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a project by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<project::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ProjectNotFound(id.to_string()))
    }

    /// Create a new project.
    pub async fn create(&self, model: project::ActiveModel) -> AppResult<project::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a project.
    pub async fn update(&self, model: project::ActiveModel) -> AppResult<project::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a project.
    ///
    /// The store cascades the deletion to owned phases and products and
    /// detaches referencing feed posts (their project link becomes NULL).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Project::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List projects matching the given criteria (newest first, offset paged).
    pub async fn list(
        &self,
        criteria: &[FilterCriteria],
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<project::Model>> {
        Project::find()
            .filter(Self::condition_for(criteria))
            .order_by_desc(project::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fold filter criteria into a query condition.
    ///
    /// Criteria that do not apply to projects (price ranges, project links)
    /// are ignored.
    fn condition_for(criteria: &[FilterCriteria]) -> Condition {
        let mut condition = Condition::all();
        for criterion in criteria {
            condition = match criterion {
                FilterCriteria::TextSearch(text) => condition.add(
                    Condition::any()
                        .add(project::Column::Name.contains(text))
                        .add(project::Column::Description.contains(text)),
                ),
                FilterCriteria::Location(location) => {
                    condition.add(project::Column::Location.contains(location))
                }
                FilterCriteria::Owner(owner_id) => {
                    condition.add(project::Column::OwnerId.eq(owner_id))
                }
                FilterCriteria::PriceRange { .. } | FilterCriteria::Project(_) => condition,
            };
        }
        condition
    }
}
