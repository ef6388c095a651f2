//! API endpoints.

mod accounts;
mod feed;
mod phases;
mod products;
mod projects;
mod uploads;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/accounts", accounts::router())
        .nest("/projects", projects::router())
        .nest("/phases", phases::router())
        .nest("/products", products::router())
        .nest("/feed", feed::router())
        .nest("/uploads", uploads::router())
}
