//! Account entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique handle; NULL until profile setup completes
    #[sea_orm(unique, nullable)]
    pub username: Option<String>,

    /// Display name
    pub name: String,

    /// Contact email
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Contact phone number
    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Profile image URL
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Biography
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// API access token (stands in for the external auth provider's session)
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project::Entity")]
    Project,

    #[sea_orm(has_many = "super::product::Entity")]
    Product,

    #[sea_orm(has_many = "super::feed_post::Entity")]
    FeedPost,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::feed_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
