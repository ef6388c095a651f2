//! API integration tests.
//!
//! These tests verify routing, authentication middleware and the error
//! envelope end to end over mock database connections.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::from_fn_with_state,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};
use std::sync::Arc;
use tanihub_api::{
    middleware::{AppState, auth_middleware},
    router as api_router,
};
use tanihub_core::{
    AccountService, CommentService, FeedService, LikeService, MediaCleanup, NoOpStorage,
    PhaseService, ProductService, ProjectService, UploadService,
};
use tanihub_db::entities::{account, feed_post, project};
use tanihub_db::repositories::{
    AccountRepository, CommentRepository, FeedPostRepository, LikeRepository, PhaseRepository,
    ProductRepository, ProjectRepository,
};
use tower::ServiceExt;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build app state with every repository backed by the same mock connection.
///
/// Queries consume the mock's result sets in execution order, so each test
/// appends exactly the results its request will trigger.
fn test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let account_repo = AccountRepository::new(Arc::clone(&db));
    let project_repo = ProjectRepository::new(Arc::clone(&db));
    let phase_repo = PhaseRepository::new(Arc::clone(&db));
    let product_repo = ProductRepository::new(Arc::clone(&db));
    let feed_repo = FeedPostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let like_repo = LikeRepository::new(Arc::clone(&db));

    let storage: tanihub_core::StorageService =
        Arc::new(NoOpStorage::new("http://test.local".to_string()));
    let cleanup = MediaCleanup::new(storage.clone());

    AppState {
        account_service: AccountService::new(account_repo, cleanup.clone()),
        project_service: ProjectService::new(
            project_repo.clone(),
            phase_repo.clone(),
            product_repo.clone(),
            cleanup.clone(),
        ),
        phase_service: PhaseService::new(phase_repo, project_repo.clone(), cleanup.clone()),
        product_service: ProductService::new(product_repo, project_repo.clone(), cleanup.clone()),
        feed_service: FeedService::new(
            feed_repo.clone(),
            comment_repo.clone(),
            like_repo.clone(),
            project_repo,
            cleanup,
        ),
        comment_service: CommentService::new(comment_repo, feed_repo.clone()),
        like_service: LikeService::new(like_repo, feed_repo),
        upload_service: UploadService::new(storage, MAX_UPLOAD_BYTES),
    }
}

fn app(state: AppState) -> Router {
    api_router()
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

fn test_account(id: &str, token: &str) -> account::Model {
    account::Model {
        id: id.to_string(),
        username: Some("sitimaw".to_string()),
        name: "Siti".to_string(),
        email: None,
        phone: None,
        avatar_url: None,
        bio: None,
        token: Some(token.to_string()),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_protected_endpoint_rejects_missing_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(json_request(
            "/projects/create",
            json!({
                "name": "Padi Organik",
                "description": "Sawah belakang rumah",
                "location": "Sleman"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_timeline_is_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<feed_post::Model>::new()])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(json_request("/feed/timeline", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_show_missing_project_returns_error_envelope() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<project::Model>::new()])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(json_request("/projects/show", json!({"projectId": "nope"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PROJECT_NOT_FOUND");
}

#[tokio::test]
async fn test_bearer_token_resolves_account() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_account("acc1", "tok123")]])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(authed_json_request("/accounts/i", "tok123", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "acc1");
    assert_eq!(body["data"]["username"], "sitimaw");
    // Token is only returned on registration
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_unknown_bearer_token_is_anonymous() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<account::Model>::new()])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(authed_json_request("/accounts/i", "bogus", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_project_validation_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_account("acc1", "tok123")]])
        .into_connection();
    let app = app(test_state(db));

    let response = app
        .oneshot(authed_json_request(
            "/projects/create",
            "tok123",
            json!({
                "name": "",
                "description": "Sawah",
                "location": "Sleman"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
