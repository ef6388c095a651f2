//! Project entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Documented project status values.
///
/// The status column is a plain string written verbatim: values outside this
/// set persist unchanged, and no transition ordering is enforced.
pub mod status {
    pub const PREPARATION: &str = "PREPARATION";
    pub const PLANTING: &str = "PLANTING";
    pub const MAINTENANCE: &str = "MAINTENANCE";
    pub const HARVEST: &str = "HARVEST";
    pub const DONE: &str = "DONE";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning account ID
    #[sea_orm(indexed)]
    pub owner_id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Free-text location (e.g. "Sleman, Yogyakarta")
    pub location: String,

    /// Status string, written verbatim (see [`status`])
    pub status: String,

    /// Cover image URL
    #[sea_orm(nullable)]
    pub cover_image_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::OwnerId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,

    #[sea_orm(has_many = "super::phase::Entity")]
    Phase,

    #[sea_orm(has_many = "super::product::Entity")]
    Product,

    #[sea_orm(has_many = "super::feed_post::Entity")]
    FeedPost,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::phase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phase.def()
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
