//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tanihub_core::{
    AccountService, CommentService, FeedService, LikeService, PhaseService, ProductService,
    ProjectService, UploadService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub project_service: ProjectService,
    pub phase_service: PhaseService,
    pub product_service: ProductService,
    pub feed_service: FeedService,
    pub comment_service: CommentService,
    pub like_service: LikeService,
    pub upload_service: UploadService,
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if let Ok(account) = state.account_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(account);
        }
    }

    next.run(req).await
}
