//! Like entity (one per account per feed post).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The account that liked the post
    pub account_id: String,

    /// The liked feed post
    #[sea_orm(indexed)]
    pub feed_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,

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
        Relation::Account.def()
    }
}

impl Related<super::feed_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
