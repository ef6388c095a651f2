//! Project service.

use crate::services::media_cleanup::MediaCleanup;
use sea_orm::Set;
use serde::Deserialize;
use tanihub_common::{AppError, AppResult, IdGenerator};
use tanihub_db::{
    entities::project::{self, status},
    repositories::{FilterCriteria, PhaseRepository, ProductRepository, ProjectRepository},
};
use validator::Validate;

/// Project service for business logic.
#[derive(Clone)]
pub struct ProjectService {
    project_repo: ProjectRepository,
    phase_repo: PhaseRepository,
    product_repo: ProductRepository,
    cleanup: MediaCleanup,
    id_gen: IdGenerator,
}

/// Input for creating a new project.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[validate(length(min = 1, max = 256))]
    pub location: String,

    /// Initial status; defaults to `PREPARATION`. Written verbatim.
    pub status: Option<String>,

    pub cover_image_url: Option<String>,
}

/// Input for updating a project.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub location: Option<String>,

    /// New cover image (None = no change, Some(None) = remove,
    /// Some(Some(url)) = set).
    pub cover_image_url: Option<Option<String>>,
}

impl ProjectService {
    /// Create a new project service.
    #[must_use]
    pub fn new(
        project_repo: ProjectRepository,
        phase_repo: PhaseRepository,
        product_repo: ProductRepository,
        cleanup: MediaCleanup,
    ) -> Self {
        Self {
            project_repo,
            phase_repo,
            product_repo,
            cleanup,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new project owned by the caller.
    pub async fn create(
        &self,
        caller_id: &str,
        input: CreateProjectInput,
    ) -> AppResult<project::Model> {
        input.validate()?;

        let model = project::ActiveModel {
            id: Set(self.id_gen.generate()),
            owner_id: Set(caller_id.to_string()),
            name: Set(input.name),
            description: Set(input.description),
            location: Set(input.location),
            status: Set(input
                .status
                .unwrap_or_else(|| status::PREPARATION.to_string())),
            cover_image_url: Set(input.cover_image_url),
            ..Default::default()
        };

        self.project_repo.create(model).await
    }

    /// Get a project by ID.
    pub async fn get(&self, project_id: &str) -> AppResult<project::Model> {
        self.project_repo.get_by_id(project_id).await
    }

    /// List projects matching the given criteria.
    pub async fn list(
        &self,
        criteria: &[FilterCriteria],
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<project::Model>> {
        self.project_repo
            .list(criteria, limit.min(100), offset)
            .await
    }

    /// Update a project's fields. Caller must own the project.
    pub async fn update(
        &self,
        caller_id: &str,
        project_id: &str,
        input: UpdateProjectInput,
    ) -> AppResult<project::Model> {
        input.validate()?;

        let project = self.owned_project(caller_id, project_id).await?;

        let mut model: project::ActiveModel = project.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(cover) = input.cover_image_url {
            model.cover_image_url = Set(cover);
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.project_repo.update(model).await
    }

    /// Set a project's status. Caller must own the project.
    ///
    /// The value is written verbatim: no membership or transition validation,
    /// matching the documented passthrough behavior.
    pub async fn update_status(
        &self,
        caller_id: &str,
        project_id: &str,
        new_status: &str,
    ) -> AppResult<project::Model> {
        let project = self.owned_project(caller_id, project_id).await?;

        let mut model: project::ActiveModel = project.into();
        model.status = Set(new_status.to_string());
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.project_repo.update(model).await
    }

    /// Delete a project and best-effort delete its media.
    ///
    /// Pipeline: ownership guard, collect image URLs (own cover first, then
    /// phase images in sequence order, then product images in creation
    /// order), delete the row (the store cascades phases/products and
    /// detaches feed posts), then attempt every collected URL against object
    /// storage. Cleanup failures never fail the operation; the project as it
    /// existed before deletion is returned.
    ///
    /// Feed posts that referenced the project keep their images; only their
    /// project link is nulled by the store.
    pub async fn delete(&self, caller_id: &str, project_id: &str) -> AppResult<project::Model> {
        let project = self.owned_project(caller_id, project_id).await?;

        // Collect before the row (and its children) disappear
        let mut media: Vec<String> = Vec::new();
        if let Some(ref cover) = project.cover_image_url {
            media.push(cover.clone());
        }
        for phase in self.phase_repo.find_by_project(project_id).await? {
            media.extend(phase.image_url_list());
        }
        for product in self.product_repo.find_by_project(project_id).await? {
            media.extend(product.image_url_list());
        }

        // Authoritative delete; storage cleanup must never precede this
        self.project_repo.delete(project_id).await?;

        self.cleanup.delete_all(&media).await;

        Ok(project)
    }

    /// Fetch a project and verify the caller owns it.
    async fn owned_project(&self, caller_id: &str, project_id: &str) -> AppResult<project::Model> {
        let project = self.project_repo.get_by_id(project_id).await?;
        if project.owner_id != caller_id {
            return Err(AppError::Unauthorized);
        }
        Ok(project)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::media_cleanup::testing::{recording, recording_with_failures};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use std::sync::Arc;
    use tanihub_db::entities::{phase, product};

    fn test_project(id: &str, owner_id: &str, cover: Option<&str>) -> project::Model {
        project::Model {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: "Padi Organik".to_string(),
            description: "Sawah organik musim tanam 2025".to_string(),
            location: "Sleman".to_string(),
            status: status::PREPARATION.to_string(),
            cover_image_url: cover.map(ToOwned::to_owned),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_phase(id: &str, project_id: &str, sequence: i32, images: &[&str]) -> phase::Model {
        phase::Model {
            id: id.to_string(),
            project_id: project_id.to_string(),
            name: format!("Fase {sequence}"),
            description: "Persiapan lahan".to_string(),
            sequence,
            status: "NOT_STARTED".to_string(),
            image_urls: json!(images),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_product(id: &str, owner_id: &str, project_id: &str, images: &[&str]) -> product::Model {
        product::Model {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            project_id: project_id.to_string(),
            name: "Beras".to_string(),
            description: "Beras organik".to_string(),
            price: 15000,
            unit: "kg".to_string(),
            image_urls: json!(images),
            status: "AVAILABLE".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn build_service(
        project_db: MockDatabase,
        phase_db: MockDatabase,
        product_db: MockDatabase,
        cleanup: MediaCleanup,
    ) -> ProjectService {
        ProjectService::new(
            ProjectRepository::new(Arc::new(project_db.into_connection())),
            PhaseRepository::new(Arc::new(phase_db.into_connection())),
            ProductRepository::new(Arc::new(product_db.into_connection())),
            cleanup,
        )
    }

    #[tokio::test]
    async fn test_delete_collects_media_in_order() {
        let project = test_project("p1", "acc1", Some("http://test/media/cover.png"));
        let phases = vec![
            test_phase(
                "ph1",
                "p1",
                1,
                &["http://test/media/ph1a.png", "http://test/media/ph1b.png"],
            ),
            test_phase("ph2", "p1", 2, &["http://test/media/ph2a.png"]),
        ];
        let products = vec![test_product(
            "pr1",
            "acc1",
            "p1",
            &["http://test/media/pr1.png"],
        )];

        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[project.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([phases]);
        let product_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([products]);

        let (storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        let deleted = service.delete("acc1", "p1").await.unwrap();
        assert_eq!(deleted.id, "p1");

        // Own cover first, then phase images by sequence, then product images
        assert_eq!(
            storage.deletions(),
            vec![
                "http://test/media/cover.png",
                "http://test/media/ph1a.png",
                "http://test/media/ph1b.png",
                "http://test/media/ph2a.png",
                "http://test/media/pr1.png",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_without_images_touches_no_storage() {
        let project = test_project("p1", "acc1", None);

        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[project]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<phase::Model>::new()]);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()]);

        let (storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        service.delete("acc1", "p1").await.unwrap();
        assert!(storage.deletions().is_empty());
    }

    #[tokio::test]
    async fn test_delete_rejects_non_owner() {
        let project = test_project("p1", "acc1", Some("http://test/media/cover.png"));

        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres);

        let (storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        let err = service.delete("acc2", "p1").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        // No side effect: nothing was deleted from storage
        assert!(storage.deletions().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_project_is_not_found() {
        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project::Model>::new()]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres);

        let (storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        let err = service.delete("acc1", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::ProjectNotFound(_)));
        assert!(storage.deletions().is_empty());
    }

    #[tokio::test]
    async fn test_delete_survives_storage_failures() {
        let project = test_project("p1", "acc1", Some("http://test/media/cover.png"));
        let phases = vec![test_phase(
            "ph1",
            "p1",
            1,
            &["http://test/media/ph1a.png", "http://test/media/ph1b.png"],
        )];

        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[project]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([phases]);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()]);

        let (storage, cleanup) =
            recording_with_failures(vec!["http://test/media/ph1a.png".to_string()]);
        let service = build_service(project_db, phase_db, product_db, cleanup);

        // One failing URL: the delete still succeeds and every URL is tried
        let deleted = service.delete("acc1", "p1").await.unwrap();
        assert_eq!(deleted.id, "p1");
        assert_eq!(storage.deletions().len(), 3);
    }

    #[tokio::test]
    async fn test_status_passthrough_persists_any_value() {
        let before = test_project("p1", "acc1", None);
        let mut after = before.clone();
        after.status = "TOTALLY_MADE_UP".to_string();
        after.updated_at = Some(Utc::now().into());

        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before], vec![after]]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres);

        let (_storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        // Out-of-enum values are not rejected by this layer
        let updated = service
            .update_status("acc1", "p1", "TOTALLY_MADE_UP")
            .await
            .unwrap();
        assert_eq!(updated.status, "TOTALLY_MADE_UP");
    }

    #[tokio::test]
    async fn test_update_status_rejects_non_owner() {
        let project = test_project("p1", "acc1", None);

        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres);

        let (_storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        let err = service
            .update_status("acc2", "p1", status::DONE)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let project_db = MockDatabase::new(DatabaseBackend::Postgres);
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let product_db = MockDatabase::new(DatabaseBackend::Postgres);

        let (_storage, cleanup) = recording();
        let service = build_service(project_db, phase_db, product_db, cleanup);

        let err = service
            .create(
                "acc1",
                CreateProjectInput {
                    name: String::new(),
                    description: "d".to_string(),
                    location: "l".to_string(),
                    status: None,
                    cover_image_url: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
