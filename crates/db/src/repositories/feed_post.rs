//! Feed post repository.

use std::sync::Arc;

use crate::entities::{FeedPost, feed_post};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tanihub_common::{AppError, AppResult};

/// Feed post repository for database operations.
#[derive(Clone)]
pub struct FeedPostRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedPostRepository {
    /// Create a new feed post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a feed post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<feed_post::Model>> {
        FeedPost::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a feed post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<feed_post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::FeedPostNotFound(id.to_string()))
    }

    /// List the timeline (newest first, offset paged).
    pub async fn timeline(&self, limit: u64, offset: u64) -> AppResult<Vec<feed_post::Model>> {
        FeedPost::find()
            .order_by_desc(feed_post::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List an account's posts (newest first, offset paged).
    pub async fn find_by_author(
        &self,
        author_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<feed_post::Model>> {
        FeedPost::find()
            .filter(feed_post::Column::AuthorId.eq(author_id))
            .order_by_desc(feed_post::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new feed post.
    pub async fn create(&self, model: feed_post::ActiveModel) -> AppResult<feed_post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a feed post.
    pub async fn update(&self, model: feed_post::ActiveModel) -> AppResult<feed_post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a feed post. Comments and likes cascade in the store.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        FeedPost::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
