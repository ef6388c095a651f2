//! Account endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tanihub_common::AppResult;
use tanihub_core::services::account::{RegisterInput, SetupProfileInput, UpdateProfileInput};
use tanihub_db::entities::account;

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Public account response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub created_at: String,
    pub username: Option<String>,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl From<account::Model> for AccountResponse {
    fn from(a: account::Model) -> Self {
        Self {
            id: a.id,
            created_at: a.created_at.to_rfc3339(),
            username: a.username,
            name: a.name,
            avatar_url: a.avatar_url,
            bio: a.bio,
        }
    }
}

/// The caller's own account, including private contact fields and token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnAccountResponse {
    pub id: String,
    pub created_at: String,
    pub username: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl OwnAccountResponse {
    fn from_model(a: account::Model, include_token: bool) -> Self {
        Self {
            id: a.id,
            created_at: a.created_at.to_rfc3339(),
            username: a.username,
            name: a.name,
            email: a.email,
            phone: a.phone,
            avatar_url: a.avatar_url,
            bio: a.bio,
            token: if include_token { a.token } else { None },
        }
    }
}

/// Show account request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowAccountRequest {
    pub account_id: Option<String>,
    pub username: Option<String>,
}

// ==================== Handlers ====================

/// Register a new account. Returns the access token once.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<OwnAccountResponse>> {
    let account = state.account_service.register(input).await?;

    Ok(ApiResponse::ok(OwnAccountResponse::from_model(
        account, true,
    )))
}

/// Get the caller's own account.
async fn me(AuthAccount(account): AuthAccount) -> ApiResponse<OwnAccountResponse> {
    ApiResponse::ok(OwnAccountResponse::from_model(account, false))
}

/// Show an account by ID or username.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowAccountRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = match (req.account_id, req.username) {
        (Some(id), _) => state.account_service.get_by_id(&id).await?,
        (None, Some(username)) => state.account_service.get_by_username(&username).await?,
        (None, None) => {
            return Err(tanihub_common::AppError::BadRequest(
                "accountId or username required".to_string(),
            ));
        }
    };

    Ok(ApiResponse::ok(account.into()))
}

/// One-time username claim.
async fn setup_profile(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<SetupProfileInput>,
) -> AppResult<ApiResponse<OwnAccountResponse>> {
    let updated = state.account_service.setup_profile(&account.id, input).await?;

    Ok(ApiResponse::ok(OwnAccountResponse::from_model(
        updated, false,
    )))
}

/// Update profile fields.
async fn update_profile(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<OwnAccountResponse>> {
    let updated = state
        .account_service
        .update_profile(&account.id, input)
        .await?;

    Ok(ApiResponse::ok(OwnAccountResponse::from_model(
        updated, false,
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/i", post(me))
        .route("/show", post(show))
        .route("/setup-profile", post(setup_profile))
        .route("/update-profile", post(update_profile))
}
