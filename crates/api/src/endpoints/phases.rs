//! Project phase endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tanihub_common::AppResult;
use tanihub_core::services::phase::{CreatePhaseInput, UpdatePhaseInput};
use tanihub_db::entities::phase;

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Phase response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResponse {
    pub id: String,
    pub created_at: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub sequence: i32,
    pub status: String,
    pub image_urls: Vec<String>,
}

impl From<phase::Model> for PhaseResponse {
    fn from(p: phase::Model) -> Self {
        let image_urls = p.image_url_list();
        Self {
            id: p.id,
            created_at: p.created_at.to_rfc3339(),
            project_id: p.project_id,
            name: p.name,
            description: p.description,
            sequence: p.sequence,
            status: p.status,
            image_urls,
        }
    }
}

/// List phases request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPhasesRequest {
    pub project_id: String,
}

/// Update phase request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhaseRequest {
    pub phase_id: String,
    #[serde(flatten)]
    pub input: UpdatePhaseInput,
}

/// Update phase status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhaseStatusRequest {
    pub phase_id: String,
    pub status: String,
}

/// Delete phase request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePhaseRequest {
    pub phase_id: String,
}

// ==================== Handlers ====================

/// Create a new phase under an owned project.
async fn create(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreatePhaseInput>,
) -> AppResult<ApiResponse<PhaseResponse>> {
    let phase = state.phase_service.create(&account.id, input).await?;

    Ok(ApiResponse::ok(phase.into()))
}

/// List a project's phases in sequence order.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListPhasesRequest>,
) -> AppResult<ApiResponse<Vec<PhaseResponse>>> {
    let phases = state.phase_service.list_by_project(&req.project_id).await?;

    Ok(ApiResponse::ok(
        phases.into_iter().map(Into::into).collect(),
    ))
}

/// Update a phase.
async fn update(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdatePhaseRequest>,
) -> AppResult<ApiResponse<PhaseResponse>> {
    let phase = state
        .phase_service
        .update(&account.id, &req.phase_id, req.input)
        .await?;

    Ok(ApiResponse::ok(phase.into()))
}

/// Set a phase's status.
async fn update_status(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdatePhaseStatusRequest>,
) -> AppResult<ApiResponse<PhaseResponse>> {
    let phase = state
        .phase_service
        .update_status(&account.id, &req.phase_id, &req.status)
        .await?;

    Ok(ApiResponse::ok(phase.into()))
}

/// Delete a phase and its images.
async fn delete(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<DeletePhaseRequest>,
) -> AppResult<ApiResponse<PhaseResponse>> {
    let phase = state
        .phase_service
        .delete(&account.id, &req.phase_id)
        .await?;

    Ok(ApiResponse::ok(phase.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/list", post(list))
        .route("/update", post(update))
        .route("/update-status", post(update_status))
        .route("/delete", post(delete))
}
