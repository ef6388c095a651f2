//! Comment service.

use sea_orm::Set;
use serde::Deserialize;
use tanihub_common::{AppResult, IdGenerator};
use tanihub_db::{
    entities::comment,
    repositories::{CommentRepository, FeedPostRepository},
};
use validator::Validate;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    feed_repo: FeedPostRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(comment_repo: CommentRepository, feed_repo: FeedPostRepository) -> Self {
        Self {
            comment_repo,
            feed_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a comment on a post, authored by the caller.
    pub async fn create(
        &self,
        caller_id: &str,
        feed_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        // Post must exist
        self.feed_repo.get_by_id(feed_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(caller_id.to_string()),
            feed_id: Set(feed_id.to_string()),
            content: Set(input.content),
            ..Default::default()
        };

        self.comment_repo.create(model).await
    }

    /// List a post's comments, oldest first.
    pub async fn list_by_post(&self, feed_id: &str) -> AppResult<Vec<comment::Model>> {
        self.feed_repo.get_by_id(feed_id).await?;
        self.comment_repo.find_by_feed(feed_id).await
    }
}
