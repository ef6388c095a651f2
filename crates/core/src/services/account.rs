//! Account service.

use crate::services::media_cleanup::MediaCleanup;
use sea_orm::Set;
use serde::Deserialize;
use tanihub_common::{AppError, AppResult, IdGenerator};
use tanihub_db::{entities::account, repositories::AccountRepository};
use validator::Validate;

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    account_repo: AccountRepository,
    cleanup: MediaCleanup,
    id_gen: IdGenerator,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 32))]
    pub phone: Option<String>,
}

/// Input for the one-time username claim.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetupProfileInput {
    #[validate(length(min = 3, max = 32), regex(path = *USERNAME_REGEX))]
    pub username: String,

    #[validate(length(max = 500))]
    pub bio: Option<String>,
}

/// Input for updating profile fields.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 32))]
    pub phone: Option<String>,

    /// New avatar (None = no change, Some(None) = remove,
    /// Some(Some(url)) = set).
    pub avatar_url: Option<Option<String>>,
}

#[allow(clippy::unwrap_used)]
static USERNAME_REGEX: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"^[a-z0-9_]+$").unwrap());

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(account_repo: AccountRepository, cleanup: MediaCleanup) -> Self {
        Self {
            account_repo,
            cleanup,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account and issue its access token.
    pub async fn register(&self, input: RegisterInput) -> AppResult<account::Model> {
        input.validate()?;

        let model = account::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(None),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            token: Set(Some(self.id_gen.generate_token())),
            ..Default::default()
        };

        self.account_repo.create(model).await
    }

    /// Resolve an access token to its account.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<account::Model> {
        self.account_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Claim a username and optionally set a bio. The username can be set
    /// only once per account.
    pub async fn setup_profile(
        &self,
        caller_id: &str,
        input: SetupProfileInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let current = self.account_repo.get_by_id(caller_id).await?;
        if current.username.is_some() {
            return Err(AppError::Conflict("Username already set".to_string()));
        }
        if self
            .account_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let mut model: account::ActiveModel = current.into();
        model.username = Set(Some(input.username));
        if let Some(bio) = input.bio {
            model.bio = Set(Some(bio));
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        self.account_repo.update(model).await
    }

    /// Update profile fields. Replacing or clearing the avatar best-effort
    /// deletes the previous image.
    pub async fn update_profile(
        &self,
        caller_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let current = self.account_repo.get_by_id(caller_id).await?;

        let old_avatar = match &input.avatar_url {
            Some(new_avatar) if *new_avatar != current.avatar_url => current.avatar_url.clone(),
            _ => None,
        };

        let mut model: account::ActiveModel = current.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(bio) = input.bio {
            model.bio = Set(Some(bio));
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(avatar_url) = input.avatar_url {
            model.avatar_url = Set(avatar_url);
        }
        model.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.account_repo.update(model).await?;

        if let Some(old) = old_avatar {
            self.cleanup.delete_all(&[old]).await;
        }

        Ok(updated)
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, account_id: &str) -> AppResult<account::Model> {
        self.account_repo.get_by_id(account_id).await
    }

    /// Get an account by username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<account::Model> {
        self.account_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::AccountNotFound(username.to_string()))
    }
}
