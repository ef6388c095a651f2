//! Product repository.

use std::sync::Arc;

use crate::entities::{Product, product};
use crate::repositories::filter::FilterCriteria;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tanihub_common::{AppError, AppResult};

/// Product repository for database operations.
#[derive(Clone)]
pub struct ProductRepository {
    db: Arc<DatabaseConnection>,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a product by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<product::Model>> {
        Product::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a product by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<product::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// List a project's products in creation order.
    pub async fn find_by_project(&self, project_id: &str) -> AppResult<Vec<product::Model>> {
        Product::find()
            .filter(product::Column::ProjectId.eq(project_id))
            .order_by_asc(product::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new product.
    pub async fn create(&self, model: product::ActiveModel) -> AppResult<product::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a product.
    pub async fn update(&self, model: product::ActiveModel) -> AppResult<product::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a product.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Product::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List products matching the given criteria (newest first, offset paged).
    pub async fn list(
        &self,
        criteria: &[FilterCriteria],
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<product::Model>> {
        Product::find()
            .filter(Self::condition_for(criteria))
            .order_by_desc(product::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fold filter criteria into a query condition.
    ///
    /// Location criteria do not apply to products and are ignored.
    fn condition_for(criteria: &[FilterCriteria]) -> Condition {
        let mut condition = Condition::all();
        for criterion in criteria {
            condition = match criterion {
                FilterCriteria::TextSearch(text) => condition.add(
                    Condition::any()
                        .add(product::Column::Name.contains(text))
                        .add(product::Column::Description.contains(text)),
                ),
                FilterCriteria::PriceRange { min, max } => {
                    let mut c = condition;
                    if let Some(min) = min {
                        c = c.add(product::Column::Price.gte(*min));
                    }
                    if let Some(max) = max {
                        c = c.add(product::Column::Price.lte(*max));
                    }
                    c
                }
                FilterCriteria::Owner(owner_id) => {
                    condition.add(product::Column::OwnerId.eq(owner_id))
                }
                FilterCriteria::Project(project_id) => {
                    condition.add(product::Column::ProjectId.eq(project_id))
                }
                FilterCriteria::Location(_) => condition,
            };
        }
        condition
    }
}
