//! Tanihub server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use tanihub_api::{middleware::AppState, router as api_router};
use tanihub_common::Config;
use tanihub_core::{
    AccountService, CommentService, FeedService, LikeService, LocalStorage, MediaCleanup,
    PhaseService, ProductService, ProjectService, StorageService, UploadService,
};
use tanihub_db::repositories::{
    AccountRepository, CommentRepository, FeedPostRepository, LikeRepository, PhaseRepository,
    ProductRepository, ProjectRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tanihub=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting tanihub server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = tanihub_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    tanihub_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let account_repo = AccountRepository::new(Arc::clone(&db));
    let project_repo = ProjectRepository::new(Arc::clone(&db));
    let phase_repo = PhaseRepository::new(Arc::clone(&db));
    let product_repo = ProductRepository::new(Arc::clone(&db));
    let feed_repo = FeedPostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let like_repo = LikeRepository::new(Arc::clone(&db));

    // Initialize media storage and cleanup
    let storage: StorageService = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.media_dir),
        config.storage.base_url.clone(),
    ));
    let cleanup = MediaCleanup::new(storage.clone());

    let max_upload_bytes =
        usize::try_from(config.storage.max_upload_bytes).unwrap_or(10 * 1024 * 1024);

    // Initialize services
    let account_service = AccountService::new(account_repo, cleanup.clone());
    let project_service = ProjectService::new(
        project_repo.clone(),
        phase_repo.clone(),
        product_repo.clone(),
        cleanup.clone(),
    );
    let phase_service = PhaseService::new(phase_repo, project_repo.clone(), cleanup.clone());
    let product_service = ProductService::new(product_repo, project_repo.clone(), cleanup.clone());
    let feed_service = FeedService::new(
        feed_repo.clone(),
        comment_repo.clone(),
        like_repo.clone(),
        project_repo,
        cleanup,
    );
    let comment_service = CommentService::new(comment_repo, feed_repo.clone());
    let like_service = LikeService::new(like_repo, feed_repo);
    let upload_service = UploadService::new(storage, max_upload_bytes);

    // Create app state
    let state = AppState {
        account_service,
        project_service,
        phase_service,
        product_service,
        feed_service,
        comment_service,
        like_service,
        upload_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .nest_service(
            "/media",
            tower_http::services::ServeDir::new(&config.storage.media_dir),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tanihub_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
