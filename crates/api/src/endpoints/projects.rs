//! Farming project endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tanihub_common::AppResult;
use tanihub_core::services::project::{CreateProjectInput, UpdateProjectInput};
use tanihub_db::{entities::project, repositories::FilterCriteria};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Project response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub created_at: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub status: String,
    pub cover_image_url: Option<String>,
}

impl From<project::Model> for ProjectResponse {
    fn from(p: project::Model) -> Self {
        Self {
            id: p.id,
            created_at: p.created_at.to_rfc3339(),
            owner_id: p.owner_id,
            name: p.name,
            description: p.description,
            location: p.location,
            status: p.status,
            cover_image_url: p.cover_image_url,
        }
    }
}

/// Show project request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProjectRequest {
    pub project_id: String,
}

/// List projects request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    pub query: Option<String>,
    pub location: Option<String>,
    pub owner_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Update project request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub project_id: String,
    #[serde(flatten)]
    pub input: UpdateProjectInput,
}

/// Update project status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectStatusRequest {
    pub project_id: String,
    pub status: String,
}

/// Delete project request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    pub project_id: String,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Create a new project.
async fn create(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> AppResult<ApiResponse<ProjectResponse>> {
    let project = state.project_service.create(&account.id, input).await?;

    Ok(ApiResponse::ok(project.into()))
}

/// Show a project.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowProjectRequest>,
) -> AppResult<ApiResponse<ProjectResponse>> {
    let project = state.project_service.get(&req.project_id).await?;

    Ok(ApiResponse::ok(project.into()))
}

/// List projects matching the given filters.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListProjectsRequest>,
) -> AppResult<ApiResponse<Vec<ProjectResponse>>> {
    let mut criteria = Vec::new();
    if let Some(query) = req.query.filter(|q| !q.is_empty()) {
        criteria.push(FilterCriteria::TextSearch(query));
    }
    if let Some(location) = req.location.filter(|l| !l.is_empty()) {
        criteria.push(FilterCriteria::Location(location));
    }
    if let Some(owner_id) = req.owner_id {
        criteria.push(FilterCriteria::Owner(owner_id));
    }

    let projects = state
        .project_service
        .list(&criteria, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(
        projects.into_iter().map(Into::into).collect(),
    ))
}

/// Update a project.
async fn update(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdateProjectRequest>,
) -> AppResult<ApiResponse<ProjectResponse>> {
    let project = state
        .project_service
        .update(&account.id, &req.project_id, req.input)
        .await?;

    Ok(ApiResponse::ok(project.into()))
}

/// Set a project's status.
async fn update_status(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdateProjectStatusRequest>,
) -> AppResult<ApiResponse<ProjectResponse>> {
    let project = state
        .project_service
        .update_status(&account.id, &req.project_id, &req.status)
        .await?;

    Ok(ApiResponse::ok(project.into()))
}

/// Delete a project along with its phases, products and media.
async fn delete(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<DeleteProjectRequest>,
) -> AppResult<ApiResponse<ProjectResponse>> {
    let project = state
        .project_service
        .delete(&account.id, &req.project_id)
        .await?;

    Ok(ApiResponse::ok(project.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/list", post(list))
        .route("/update", post(update))
        .route("/update-status", post(update_status))
        .route("/delete", post(delete))
}
