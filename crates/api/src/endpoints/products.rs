//! Product marketplace endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tanihub_common::AppResult;
use tanihub_core::services::product::{CreateProductInput, UpdateProductInput};
use tanihub_db::{entities::product, repositories::FilterCriteria};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Product response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub created_at: String,
    pub owner_id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub unit: String,
    pub status: String,
    pub image_urls: Vec<String>,
}

impl From<product::Model> for ProductResponse {
    fn from(p: product::Model) -> Self {
        let image_urls = p.image_url_list();
        Self {
            id: p.id,
            created_at: p.created_at.to_rfc3339(),
            owner_id: p.owner_id,
            project_id: p.project_id,
            name: p.name,
            description: p.description,
            price: p.price,
            unit: p.unit,
            status: p.status,
            image_urls,
        }
    }
}

/// Show product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProductRequest {
    pub product_id: String,
}

/// List products request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsRequest {
    pub query: Option<String>,
    pub owner_id: Option<String>,
    pub project_id: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Update product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_id: String,
    #[serde(flatten)]
    pub input: UpdateProductInput,
}

/// Delete product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductRequest {
    pub product_id: String,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Create a new product under an owned project.
async fn create(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.create(&account.id, input).await?;

    Ok(ApiResponse::ok(product.into()))
}

/// Show a product.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.get(&req.product_id).await?;

    Ok(ApiResponse::ok(product.into()))
}

/// List products matching the given filters.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListProductsRequest>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let mut criteria = Vec::new();
    if let Some(query) = req.query.filter(|q| !q.is_empty()) {
        criteria.push(FilterCriteria::TextSearch(query));
    }
    if let Some(owner_id) = req.owner_id {
        criteria.push(FilterCriteria::Owner(owner_id));
    }
    if let Some(project_id) = req.project_id {
        criteria.push(FilterCriteria::Project(project_id));
    }
    if req.min_price.is_some() || req.max_price.is_some() {
        criteria.push(FilterCriteria::PriceRange {
            min: req.min_price,
            max: req.max_price,
        });
    }

    let products = state
        .product_service
        .list(&criteria, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(
        products.into_iter().map(Into::into).collect(),
    ))
}

/// Update a product.
async fn update(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdateProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state
        .product_service
        .update(&account.id, &req.product_id, req.input)
        .await?;

    Ok(ApiResponse::ok(product.into()))
}

/// Delete a product and its images.
async fn delete(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<DeleteProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state
        .product_service
        .delete(&account.id, &req.product_id)
        .await?;

    Ok(ApiResponse::ok(product.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/list", post(list))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
