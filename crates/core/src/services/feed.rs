//! Feed service.

use crate::services::media_cleanup::MediaCleanup;
use sea_orm::Set;
use serde::Deserialize;
use serde_json::json;
use tanihub_common::{AppError, AppResult, IdGenerator};
use tanihub_db::{
    entities::feed_post,
    repositories::{CommentRepository, FeedPostRepository, LikeRepository, ProjectRepository},
};
use validator::Validate;

/// Feed service for business logic.
#[derive(Clone)]
pub struct FeedService {
    feed_repo: FeedPostRepository,
    comment_repo: CommentRepository,
    like_repo: LikeRepository,
    project_repo: ProjectRepository,
    cleanup: MediaCleanup,
    id_gen: IdGenerator,
}

/// Input for creating a new feed post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedPostInput {
    #[validate(length(max = 3000))]
    pub content: String,

    /// Optional project this post is about.
    pub project_id: Option<String>,

    #[serde(default)]
    #[validate(length(max = 8))]
    pub image_urls: Vec<String>,
}

/// Input for updating a feed post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedPostInput {
    #[validate(length(max = 3000))]
    pub content: Option<String>,

    #[validate(length(max = 8))]
    pub image_urls: Option<Vec<String>>,
}

/// A feed post together with its like and comment counts.
pub struct FeedPostWithCounts {
    pub post: feed_post::Model,
    pub like_count: u64,
    pub comment_count: u64,
}

impl FeedService {
    /// Create a new feed service.
    #[must_use]
    pub fn new(
        feed_repo: FeedPostRepository,
        comment_repo: CommentRepository,
        like_repo: LikeRepository,
        project_repo: ProjectRepository,
        cleanup: MediaCleanup,
    ) -> Self {
        Self {
            feed_repo,
            comment_repo,
            like_repo,
            project_repo,
            cleanup,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new feed post authored by the caller.
    pub async fn create_post(
        &self,
        caller_id: &str,
        input: CreateFeedPostInput,
    ) -> AppResult<feed_post::Model> {
        input.validate()?;

        if input.content.trim().is_empty() && input.image_urls.is_empty() {
            return Err(AppError::BadRequest(
                "Content or images required".to_string(),
            ));
        }

        // A linked project must exist; any account may post about any project
        if let Some(ref project_id) = input.project_id {
            self.project_repo.get_by_id(project_id).await?;
        }

        let model = feed_post::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(caller_id.to_string()),
            project_id: Set(input.project_id),
            content: Set(input.content),
            image_urls: Set(json!(input.image_urls)),
            ..Default::default()
        };

        self.feed_repo.create(model).await
    }

    /// Get a single post with counts.
    pub async fn get_post(&self, post_id: &str) -> AppResult<FeedPostWithCounts> {
        let post = self.feed_repo.get_by_id(post_id).await?;
        self.with_counts(post).await
    }

    /// List the timeline (newest first) with counts.
    pub async fn timeline(&self, limit: u64, offset: u64) -> AppResult<Vec<FeedPostWithCounts>> {
        let posts = self.feed_repo.timeline(limit.min(100), offset).await?;

        let mut result = Vec::with_capacity(posts.len());
        for post in posts {
            result.push(self.with_counts(post).await?);
        }
        Ok(result)
    }

    /// List an account's posts (newest first) with counts.
    pub async fn by_author(
        &self,
        author_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<FeedPostWithCounts>> {
        let posts = self
            .feed_repo
            .find_by_author(author_id, limit.min(100), offset)
            .await?;

        let mut result = Vec::with_capacity(posts.len());
        for post in posts {
            result.push(self.with_counts(post).await?);
        }
        Ok(result)
    }

    /// Update a post's content or images. Caller must be the author.
    pub async fn update_post(
        &self,
        caller_id: &str,
        post_id: &str,
        input: UpdateFeedPostInput,
    ) -> AppResult<feed_post::Model> {
        input.validate()?;

        let post = self.owned_post(caller_id, post_id).await?;

        let mut model: feed_post::ActiveModel = post.into();
        if let Some(content) = input.content {
            model.content = Set(content);
        }
        if let Some(image_urls) = input.image_urls {
            model.image_urls = Set(json!(image_urls));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.feed_repo.update(model).await
    }

    /// Delete a post and best-effort delete its images.
    ///
    /// Comments and likes cascade in the store.
    pub async fn delete_post(&self, caller_id: &str, post_id: &str) -> AppResult<feed_post::Model> {
        let post = self.owned_post(caller_id, post_id).await?;
        let media = post.image_url_list();

        self.feed_repo.delete(post_id).await?;
        self.cleanup.delete_all(&media).await;

        Ok(post)
    }

    /// Fetch a post and verify the caller authored it.
    async fn owned_post(&self, caller_id: &str, post_id: &str) -> AppResult<feed_post::Model> {
        let post = self.feed_repo.get_by_id(post_id).await?;
        if post.author_id != caller_id {
            return Err(AppError::Unauthorized);
        }
        Ok(post)
    }

    async fn with_counts(&self, post: feed_post::Model) -> AppResult<FeedPostWithCounts> {
        let like_count = self.like_repo.count_by_feed(&post.id).await?;
        let comment_count = self.comment_repo.count_by_feed(&post.id).await?;
        Ok(FeedPostWithCounts {
            post,
            like_count,
            comment_count,
        })
    }
}
