//! Comment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author account ID
    pub author_id: String,

    /// The feed post being commented on
    #[sea_orm(indexed)]
    pub feed_id: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AuthorId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(
        belongs_to = "super::feed_post::Entity",
        from = "Column::FeedId",
        to = "super::feed_post::Column::Id",
        on_delete = "Cascade"
    )]
    FeedPost,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::feed_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
