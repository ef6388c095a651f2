//! Like repository.

use std::sync::Arc;

use crate::entities::{Like, like};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    SqlErr,
};
use tanihub_common::{AppError, AppResult};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account's like on a post.
    pub async fn find_by_account_and_feed(
        &self,
        account_id: &str,
        feed_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::AccountId.eq(account_id))
            .filter(like::Column::FeedId.eq(feed_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a post's likes.
    pub async fn count_by_feed(&self, feed_id: &str) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::FeedId.eq(feed_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new like.
    ///
    /// A concurrent duplicate insert for the same (account, post) pair is
    /// rejected by the store's unique index and surfaces as `Conflict`.
    pub async fn create(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Already liked this post".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a like.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Like::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
