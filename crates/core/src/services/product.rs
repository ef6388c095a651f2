//! Product service.

use crate::services::media_cleanup::MediaCleanup;
use sea_orm::Set;
use serde::Deserialize;
use serde_json::json;
use tanihub_common::{AppError, AppResult, IdGenerator};
use tanihub_db::{
    entities::product::{self, status},
    repositories::{FilterCriteria, ProductRepository, ProjectRepository},
};
use validator::Validate;

/// Product service for business logic.
#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    project_repo: ProjectRepository,
    cleanup: MediaCleanup,
    id_gen: IdGenerator,
}

/// Input for creating a new product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub project_id: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: String,

    /// Price in whole Rupiah; must be positive.
    #[validate(range(min = 1))]
    pub price: i64,

    #[validate(length(min = 1, max = 64))]
    pub unit: String,

    #[serde(default)]
    pub image_urls: Vec<String>,

    /// Initial status; defaults to `AVAILABLE`. Written verbatim.
    pub status: Option<String>,
}

/// Input for updating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    /// Move the product to another project (must also be owned by the caller).
    pub project_id: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub price: Option<i64>,

    #[validate(length(min = 1, max = 64))]
    pub unit: Option<String>,

    pub image_urls: Option<Vec<String>>,

    /// New status, written verbatim.
    pub status: Option<String>,
}

impl ProductService {
    /// Create a new product service.
    #[must_use]
    pub fn new(
        product_repo: ProductRepository,
        project_repo: ProjectRepository,
        cleanup: MediaCleanup,
    ) -> Self {
        Self {
            product_repo,
            project_repo,
            cleanup,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a product owned by the caller.
    ///
    /// The referenced project must exist and be owned by the caller, keeping
    /// product and project ownership consistent.
    pub async fn create(
        &self,
        caller_id: &str,
        input: CreateProductInput,
    ) -> AppResult<product::Model> {
        input.validate()?;

        let project = self.project_repo.get_by_id(&input.project_id).await?;
        if project.owner_id != caller_id {
            return Err(AppError::Unauthorized);
        }

        let model = product::ActiveModel {
            id: Set(self.id_gen.generate()),
            owner_id: Set(caller_id.to_string()),
            project_id: Set(input.project_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            unit: Set(input.unit),
            image_urls: Set(json!(input.image_urls)),
            status: Set(input
                .status
                .unwrap_or_else(|| status::AVAILABLE.to_string())),
            ..Default::default()
        };

        self.product_repo.create(model).await
    }

    /// Get a product by ID.
    pub async fn get(&self, product_id: &str) -> AppResult<product::Model> {
        self.product_repo.get_by_id(product_id).await
    }

    /// List products matching the given criteria.
    pub async fn list(
        &self,
        criteria: &[FilterCriteria],
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<product::Model>> {
        self.product_repo
            .list(criteria, limit.min(100), offset)
            .await
    }

    /// Update a product. Caller must own it.
    pub async fn update(
        &self,
        caller_id: &str,
        product_id: &str,
        input: UpdateProductInput,
    ) -> AppResult<product::Model> {
        input.validate()?;

        let product = self.owned_product(caller_id, product_id).await?;

        // A new project link must also belong to the caller
        if let Some(ref project_id) = input.project_id {
            let project = self.project_repo.get_by_id(project_id).await?;
            if project.owner_id != caller_id {
                return Err(AppError::Unauthorized);
            }
        }

        let mut model: product::ActiveModel = product.into();
        if let Some(project_id) = input.project_id {
            model.project_id = Set(project_id);
        }
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(price) = input.price {
            model.price = Set(price);
        }
        if let Some(unit) = input.unit {
            model.unit = Set(unit);
        }
        if let Some(image_urls) = input.image_urls {
            model.image_urls = Set(json!(image_urls));
        }
        if let Some(new_status) = input.status {
            model.status = Set(new_status);
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.product_repo.update(model).await
    }

    /// Delete a product and best-effort delete its images.
    pub async fn delete(&self, caller_id: &str, product_id: &str) -> AppResult<product::Model> {
        let product = self.owned_product(caller_id, product_id).await?;
        let media = product.image_url_list();

        self.product_repo.delete(product_id).await?;
        self.cleanup.delete_all(&media).await;

        Ok(product)
    }

    /// Fetch a product and verify the caller owns it.
    async fn owned_product(&self, caller_id: &str, product_id: &str) -> AppResult<product::Model> {
        let product = self.product_repo.get_by_id(product_id).await?;
        if product.owner_id != caller_id {
            return Err(AppError::Unauthorized);
        }
        Ok(product)
    }
}
