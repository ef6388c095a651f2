//! Like service.

use sea_orm::Set;
use tanihub_common::{AppResult, IdGenerator};
use tanihub_db::{
    entities::like,
    repositories::{FeedPostRepository, LikeRepository},
};

/// Result of toggling a like.
#[derive(Debug)]
pub enum LikeToggle {
    /// The post is now liked by the account.
    Liked(like::Model),
    /// The account's existing like was removed.
    Unliked,
}

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    feed_repo: FeedPostRepository,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub fn new(like_repo: LikeRepository, feed_repo: FeedPostRepository) -> Self {
        Self {
            like_repo,
            feed_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the caller's like on a post.
    ///
    /// Two concurrent toggles that both observe "not yet liked" race on the
    /// store's unique (account, post) index; the loser surfaces as `Conflict`
    /// rather than inserting a duplicate row.
    pub async fn toggle(&self, caller_id: &str, feed_id: &str) -> AppResult<LikeToggle> {
        // Post must exist
        self.feed_repo.get_by_id(feed_id).await?;

        if let Some(existing) = self
            .like_repo
            .find_by_account_and_feed(caller_id, feed_id)
            .await?
        {
            self.like_repo.delete(&existing.id).await?;
            return Ok(LikeToggle::Unliked);
        }

        let model = like::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(caller_id.to_string()),
            feed_id: Set(feed_id.to_string()),
            ..Default::default()
        };

        let created = self.like_repo.create(model).await?;
        Ok(LikeToggle::Liked(created))
    }

    /// Whether the account has liked the post.
    pub async fn has_liked(&self, account_id: &str, feed_id: &str) -> AppResult<bool> {
        Ok(self
            .like_repo
            .find_by_account_and_feed(account_id, feed_id)
            .await?
            .is_some())
    }

    /// Count a post's likes.
    pub async fn count(&self, feed_id: &str) -> AppResult<u64> {
        self.like_repo.count_by_feed(feed_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use std::sync::Arc;
    use tanihub_db::entities::feed_post;

    fn test_post(id: &str) -> feed_post::Model {
        feed_post::Model {
            id: id.to_string(),
            author_id: "acc1".to_string(),
            project_id: None,
            content: "Bibit sudah tumbuh".to_string(),
            image_urls: json!([]),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_like(id: &str, account_id: &str, feed_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            account_id: account_id.to_string(),
            feed_id: feed_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn build_service(like_db: MockDatabase, feed_db: MockDatabase) -> LikeService {
        LikeService::new(
            LikeRepository::new(Arc::new(like_db.into_connection())),
            FeedPostRepository::new(Arc::new(feed_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_toggle_creates_when_absent() {
        let created = test_like("l1", "acc2", "f1");

        let like_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<like::Model>::new()])
            .append_query_results([[created]]);
        let feed_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[test_post("f1")]]);

        let service = build_service(like_db, feed_db);

        let result = service.toggle("acc2", "f1").await.unwrap();
        assert!(matches!(result, LikeToggle::Liked(_)));
    }

    #[tokio::test]
    async fn test_toggle_removes_when_present() {
        let existing = test_like("l1", "acc2", "f1");

        let like_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let feed_db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[test_post("f1")]]);

        let service = build_service(like_db, feed_db);

        let result = service.toggle("acc2", "f1").await.unwrap();
        assert!(matches!(result, LikeToggle::Unliked));
    }

    #[tokio::test]
    async fn test_toggle_missing_post_is_not_found() {
        let like_db = MockDatabase::new(DatabaseBackend::Postgres);
        let feed_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<feed_post::Model>::new()]);

        let service = build_service(like_db, feed_db);

        let err = service.toggle("acc2", "nope").await.unwrap_err();
        assert!(matches!(
            err,
            tanihub_common::AppError::FeedPostNotFound(_)
        ));
    }
}
