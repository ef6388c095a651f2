//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `tanihub_test`)
//!   `TEST_DB_PASSWORD` (default: `tanihub_test`)
//!   `TEST_DB_NAME` (default: `tanihub_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use sea_orm::{DatabaseConnection, Set};
use serde_json::json;
use tanihub_common::{AppError, IdGenerator};
use tanihub_db::entities::{account, feed_post, like, phase, product, project};
use tanihub_db::repositories::{
    AccountRepository, FeedPostRepository, LikeRepository, PhaseRepository, ProductRepository,
    ProjectRepository,
};
use tanihub_db::test_utils::{TestDatabase, TestDbConfig};

fn ids() -> IdGenerator {
    IdGenerator::new()
}

async fn seed_account(conn: &Arc<DatabaseConnection>) -> account::Model {
    let id_gen = ids();
    AccountRepository::new(conn.clone())
        .create(account::ActiveModel {
            id: Set(id_gen.generate()),
            name: Set("Pak Tani".to_string()),
            token: Set(Some(id_gen.generate_token())),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn seed_project(conn: &Arc<DatabaseConnection>, owner_id: &str) -> project::Model {
    ProjectRepository::new(conn.clone())
        .create(project::ActiveModel {
            id: Set(ids().generate()),
            owner_id: Set(owner_id.to_string()),
            name: Set("Padi Organik".to_string()),
            description: Set("Sawah organik musim tanam 2026".to_string()),
            location: Set("Sleman".to_string()),
            status: Set(project::status::PREPARATION.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_project_delete_cascades_to_phases_and_products() {
    let db = TestDatabase::new().await.unwrap();
    let conn = Arc::new(db.conn.clone());

    let owner = seed_account(&conn).await;
    let project = seed_project(&conn, &owner.id).await;

    let phase_repo = PhaseRepository::new(conn.clone());
    phase_repo
        .create(phase::ActiveModel {
            id: Set(ids().generate()),
            project_id: Set(project.id.clone()),
            name: Set("Persiapan lahan".to_string()),
            description: Set("Pengolahan tanah".to_string()),
            sequence: Set(1),
            status: Set(phase::status::NOT_STARTED.to_string()),
            image_urls: Set(json!([])),
            ..Default::default()
        })
        .await
        .unwrap();

    let product_repo = ProductRepository::new(conn.clone());
    product_repo
        .create(product::ActiveModel {
            id: Set(ids().generate()),
            owner_id: Set(owner.id.clone()),
            project_id: Set(project.id.clone()),
            name: Set("Beras".to_string()),
            description: Set("Beras organik".to_string()),
            price: Set(15000),
            unit: Set("kg".to_string()),
            image_urls: Set(json!([])),
            status: Set(product::status::AVAILABLE.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let project_repo = ProjectRepository::new(conn.clone());
    project_repo.delete(&project.id).await.unwrap();

    // The store removes dependent rows, not just the project row
    assert!(project_repo.find_by_id(&project.id).await.unwrap().is_none());
    assert!(
        phase_repo
            .find_by_project(&project.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        product_repo
            .find_by_project(&project.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_project_delete_detaches_feed_posts() {
    let db = TestDatabase::new().await.unwrap();
    let conn = Arc::new(db.conn.clone());

    let owner = seed_account(&conn).await;
    let project = seed_project(&conn, &owner.id).await;

    let feed_repo = FeedPostRepository::new(conn.clone());
    let post = feed_repo
        .create(feed_post::ActiveModel {
            id: Set(ids().generate()),
            author_id: Set(owner.id.clone()),
            project_id: Set(Some(project.id.clone())),
            content: Set("Panen perdana".to_string()),
            image_urls: Set(json!(["http://localhost:3000/media/panen.png"])),
            ..Default::default()
        })
        .await
        .unwrap();

    ProjectRepository::new(conn.clone())
        .delete(&project.id)
        .await
        .unwrap();

    // The post survives with its images; only the project link is cleared
    let detached = feed_repo.get_by_id(&post.id).await.unwrap();
    assert_eq!(detached.project_id, None);
    assert_eq!(detached.image_urls, post.image_urls);
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_duplicate_like_is_conflict() {
    let db = TestDatabase::new().await.unwrap();
    let conn = Arc::new(db.conn.clone());

    let liker = seed_account(&conn).await;
    let author = seed_account(&conn).await;

    let post = FeedPostRepository::new(conn.clone())
        .create(feed_post::ActiveModel {
            id: Set(ids().generate()),
            author_id: Set(author.id.clone()),
            content: Set("Bibit sudah tiba".to_string()),
            image_urls: Set(json!([])),
            ..Default::default()
        })
        .await
        .unwrap();

    let like_repo = LikeRepository::new(conn.clone());
    like_repo
        .create(like::ActiveModel {
            id: Set(ids().generate()),
            account_id: Set(liker.id.clone()),
            feed_id: Set(post.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    // Second insert for the same (account, post) pair hits the unique index
    let err = like_repo
        .create(like::ActiveModel {
            id: Set(ids().generate()),
            account_id: Set(liker.id.clone()),
            feed_id: Set(post.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(like_repo.count_by_feed(&post.id).await.unwrap(), 1);
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
