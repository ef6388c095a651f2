//! Social feed endpoints: posts, comments and likes.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tanihub_common::AppResult;
use tanihub_core::services::comment::CreateCommentInput;
use tanihub_core::services::feed::{
    CreateFeedPostInput, FeedPostWithCounts, UpdateFeedPostInput,
};
use tanihub_core::services::like::LikeToggle;
use tanihub_db::entities::{comment, feed_post};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Feed post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostResponse {
    pub id: String,
    pub created_at: String,
    pub author_id: String,
    pub project_id: Option<String>,
    pub content: String,
    pub image_urls: Vec<String>,
    pub like_count: u64,
    pub comment_count: u64,
}

impl FeedPostResponse {
    fn from_post(post: feed_post::Model, like_count: u64, comment_count: u64) -> Self {
        let image_urls = post.image_url_list();
        Self {
            id: post.id,
            created_at: post.created_at.to_rfc3339(),
            author_id: post.author_id,
            project_id: post.project_id,
            content: post.content,
            image_urls,
            like_count,
            comment_count,
        }
    }
}

impl From<FeedPostWithCounts> for FeedPostResponse {
    fn from(p: FeedPostWithCounts) -> Self {
        Self::from_post(p.post, p.like_count, p.comment_count)
    }
}

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub created_at: String,
    pub author_id: String,
    pub feed_id: String,
    pub content: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            created_at: c.created_at.to_rfc3339(),
            author_id: c.author_id,
            feed_id: c.feed_id,
            content: c.content,
        }
    }
}

/// Like toggle response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleResponse {
    pub liked: bool,
}

/// Show post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPostRequest {
    pub post_id: String,
}

/// Timeline request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Author posts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPostsRequest {
    pub author_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Update post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_id: String,
    #[serde(flatten)]
    pub input: UpdateFeedPostInput,
}

/// Delete post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: String,
}

/// Create comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: String,
    #[serde(flatten)]
    pub input: CreateCommentInput,
}

/// List comments request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsRequest {
    pub post_id: String,
}

/// Toggle like request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub post_id: String,
}

const fn default_limit() -> u64 {
    10
}

// ==================== Handlers ====================

/// Create a new feed post.
async fn create(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateFeedPostInput>,
) -> AppResult<ApiResponse<FeedPostResponse>> {
    let post = state.feed_service.create_post(&account.id, input).await?;

    Ok(ApiResponse::ok(FeedPostResponse::from_post(post, 0, 0)))
}

/// Show a post with counts.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> AppResult<ApiResponse<FeedPostResponse>> {
    let post = state.feed_service.get_post(&req.post_id).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Get the public timeline, newest first.
async fn timeline(
    State(state): State<AppState>,
    Json(req): Json<TimelineRequest>,
) -> AppResult<ApiResponse<Vec<FeedPostResponse>>> {
    let posts = state.feed_service.timeline(req.limit, req.offset).await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Get an account's posts, newest first.
async fn by_author(
    State(state): State<AppState>,
    Json(req): Json<AuthorPostsRequest>,
) -> AppResult<ApiResponse<Vec<FeedPostResponse>>> {
    let posts = state
        .feed_service
        .by_author(&req.author_id, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Update a post.
async fn update(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<FeedPostResponse>> {
    let post = state
        .feed_service
        .update_post(&account.id, &req.post_id, req.input)
        .await?;

    Ok(ApiResponse::ok(FeedPostResponse::from_post(post, 0, 0)))
}

/// Delete a post and its images.
async fn delete(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<DeletePostRequest>,
) -> AppResult<ApiResponse<FeedPostResponse>> {
    let post = state
        .feed_service
        .delete_post(&account.id, &req.post_id)
        .await?;

    Ok(ApiResponse::ok(FeedPostResponse::from_post(post, 0, 0)))
}

/// Comment on a post.
async fn create_comment(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .create(&account.id, &req.post_id, req.input)
        .await?;

    Ok(ApiResponse::ok(comment.into()))
}

/// List a post's comments, oldest first.
async fn list_comments(
    State(state): State<AppState>,
    Json(req): Json<ListCommentsRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state.comment_service.list_by_post(&req.post_id).await?;

    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// Toggle the caller's like on a post.
async fn toggle_like(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(req): Json<ToggleLikeRequest>,
) -> AppResult<ApiResponse<LikeToggleResponse>> {
    let toggle = state.like_service.toggle(&account.id, &req.post_id).await?;

    Ok(ApiResponse::ok(LikeToggleResponse {
        liked: matches!(toggle, LikeToggle::Liked(_)),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/timeline", post(timeline))
        .route("/by-author", post(by_author))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/comments/create", post(create_comment))
        .route("/comments/list", post(list_comments))
        .route("/likes/toggle", post(toggle_like))
}
