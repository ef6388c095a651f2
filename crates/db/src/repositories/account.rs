//! Account repository.

use std::sync::Arc;

use crate::entities::{Account, account};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tanihub_common::{AppError, AppResult};

/// Account repository for database operations.
#[derive(Clone)]
pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<account::Model>> {
        Account::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<account::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }

    /// Find an account by its unique handle.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by API token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new account.
    pub async fn create(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an account.
    pub async fn update(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
