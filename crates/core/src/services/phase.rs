//! Phase service.

use crate::services::media_cleanup::MediaCleanup;
use sea_orm::Set;
use serde::Deserialize;
use serde_json::json;
use tanihub_common::{AppError, AppResult, IdGenerator};
use tanihub_db::{
    entities::phase::{self, status},
    repositories::{PhaseRepository, ProjectRepository},
};
use validator::Validate;

/// Phase service for business logic.
#[derive(Clone)]
pub struct PhaseService {
    phase_repo: PhaseRepository,
    project_repo: ProjectRepository,
    cleanup: MediaCleanup,
    id_gen: IdGenerator,
}

/// Input for creating a new phase.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhaseInput {
    pub project_id: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: String,

    pub sequence: i32,

    /// Initial status; defaults to `NOT_STARTED`. Written verbatim.
    pub status: Option<String>,

    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Input for updating a phase.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhaseInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub sequence: Option<i32>,

    pub image_urls: Option<Vec<String>>,
}

impl PhaseService {
    /// Create a new phase service.
    #[must_use]
    pub fn new(
        phase_repo: PhaseRepository,
        project_repo: ProjectRepository,
        cleanup: MediaCleanup,
    ) -> Self {
        Self {
            phase_repo,
            project_repo,
            cleanup,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a phase under a project the caller owns.
    pub async fn create(&self, caller_id: &str, input: CreatePhaseInput) -> AppResult<phase::Model> {
        input.validate()?;

        // Parent must exist and belong to the caller
        let project = self.project_repo.get_by_id(&input.project_id).await?;
        if project.owner_id != caller_id {
            return Err(AppError::Unauthorized);
        }

        let model = phase::ActiveModel {
            id: Set(self.id_gen.generate()),
            project_id: Set(input.project_id),
            name: Set(input.name),
            description: Set(input.description),
            sequence: Set(input.sequence),
            status: Set(input
                .status
                .unwrap_or_else(|| status::NOT_STARTED.to_string())),
            image_urls: Set(json!(input.image_urls)),
            ..Default::default()
        };

        self.phase_repo.create(model).await
    }

    /// List a project's phases in sequence order.
    pub async fn list_by_project(&self, project_id: &str) -> AppResult<Vec<phase::Model>> {
        self.phase_repo.find_by_project(project_id).await
    }

    /// Update a phase's fields. Caller must own the parent project.
    pub async fn update(
        &self,
        caller_id: &str,
        phase_id: &str,
        input: UpdatePhaseInput,
    ) -> AppResult<phase::Model> {
        input.validate()?;

        let phase = self.owned_phase(caller_id, phase_id).await?;

        let mut model: phase::ActiveModel = phase.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(sequence) = input.sequence {
            model.sequence = Set(sequence);
        }
        if let Some(image_urls) = input.image_urls {
            model.image_urls = Set(json!(image_urls));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.phase_repo.update(model).await
    }

    /// Set a phase's status. Caller must own the parent project.
    ///
    /// The value is written verbatim, no membership or transition validation.
    pub async fn update_status(
        &self,
        caller_id: &str,
        phase_id: &str,
        new_status: &str,
    ) -> AppResult<phase::Model> {
        let phase = self.owned_phase(caller_id, phase_id).await?;

        let mut model: phase::ActiveModel = phase.into();
        model.status = Set(new_status.to_string());
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.phase_repo.update(model).await
    }

    /// Delete a phase and best-effort delete its images.
    pub async fn delete(&self, caller_id: &str, phase_id: &str) -> AppResult<phase::Model> {
        let phase = self.owned_phase(caller_id, phase_id).await?;
        let media = phase.image_url_list();

        self.phase_repo.delete(phase_id).await?;
        self.cleanup.delete_all(&media).await;

        Ok(phase)
    }

    /// Fetch a phase and verify the caller owns its parent project.
    async fn owned_phase(&self, caller_id: &str, phase_id: &str) -> AppResult<phase::Model> {
        let phase = self.phase_repo.get_by_id(phase_id).await?;
        let project = self.project_repo.get_by_id(&phase.project_id).await?;
        if project.owner_id != caller_id {
            return Err(AppError::Unauthorized);
        }
        Ok(phase)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::media_cleanup::testing::recording;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use tanihub_db::entities::project;

    fn test_project(id: &str, owner_id: &str) -> project::Model {
        project::Model {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: "Cabai Rawit".to_string(),
            description: "Kebun cabai".to_string(),
            location: "Bantul".to_string(),
            status: "PLANTING".to_string(),
            cover_image_url: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_phase(id: &str, project_id: &str, images: &[&str]) -> phase::Model {
        phase::Model {
            id: id.to_string(),
            project_id: project_id.to_string(),
            name: "Penyemaian".to_string(),
            description: String::new(),
            sequence: 1,
            status: status::RUNNING.to_string(),
            image_urls: serde_json::json!(images),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn build_service(
        phase_db: MockDatabase,
        project_db: MockDatabase,
        cleanup: MediaCleanup,
    ) -> PhaseService {
        PhaseService::new(
            PhaseRepository::new(Arc::new(phase_db.into_connection())),
            ProjectRepository::new(Arc::new(project_db.into_connection())),
            cleanup,
        )
    }

    #[tokio::test]
    async fn test_create_requires_parent_ownership() {
        let project = test_project("p1", "acc1");

        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);

        let (_storage, cleanup) = recording();
        let service = build_service(phase_db, project_db, cleanup);

        let err = service
            .create(
                "acc2",
                CreatePhaseInput {
                    project_id: "p1".to_string(),
                    name: "Fase".to_string(),
                    description: String::new(),
                    sequence: 1,
                    status: None,
                    image_urls: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_create_missing_parent_is_not_found() {
        let phase_db = MockDatabase::new(DatabaseBackend::Postgres);
        let project_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project::Model>::new()]);

        let (_storage, cleanup) = recording();
        let service = build_service(phase_db, project_db, cleanup);

        let err = service
            .create(
                "acc1",
                CreatePhaseInput {
                    project_id: "nope".to_string(),
                    name: "Fase".to_string(),
                    description: String::new(),
                    sequence: 1,
                    status: None,
                    image_urls: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_status_checks_parent_ownership() {
        // The caller owning the parent project is required even for a bare
        // status write.
        let phase = test_phase("ph1", "p1", &[]);
        let project = test_project("p1", "acc1");

        let phase_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[phase]]);
        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);

        let (_storage, cleanup) = recording();
        let service = build_service(phase_db, project_db, cleanup);

        let err = service
            .update_status("intruder", "ph1", status::DONE)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_update_status_writes_verbatim() {
        let phase = test_phase("ph1", "p1", &[]);
        let project = test_project("p1", "acc1");
        let mut after = phase.clone();
        after.status = "paused".to_string();
        after.updated_at = Some(Utc::now().into());

        let phase_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![phase], vec![after]]);
        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);

        let (_storage, cleanup) = recording();
        let service = build_service(phase_db, project_db, cleanup);

        let updated = service.update_status("acc1", "ph1", "paused").await.unwrap();
        assert_eq!(updated.status, "paused");
    }

    #[tokio::test]
    async fn test_delete_cleans_up_own_images() {
        let phase = test_phase(
            "ph1",
            "p1",
            &["http://test/media/a.png", "http://test/media/b.png"],
        );
        let project = test_project("p1", "acc1");

        let phase_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[phase]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let project_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);

        let (storage, cleanup) = recording();
        let service = build_service(phase_db, project_db, cleanup);

        let deleted = service.delete("acc1", "ph1").await.unwrap();
        assert_eq!(deleted.id, "ph1");
        assert_eq!(
            storage.deletions(),
            vec!["http://test/media/a.png", "http://test/media/b.png"]
        );
    }
}
