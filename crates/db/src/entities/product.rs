//! Product entity (marketplace listing).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Documented product status values (written verbatim, not validated).
pub mod status {
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
    pub const AVAILABLE: &str = "AVAILABLE";
    pub const SOLD: &str = "SOLD";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning account ID (the selling farmer)
    #[sea_orm(indexed)]
    pub owner_id: String,

    /// Project this product originates from
    #[sea_orm(indexed)]
    pub project_id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Price in whole Rupiah
    pub price: i64,

    /// Unit label (e.g. "kg", "ikat")
    pub unit: String,

    /// Image URLs (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub image_urls: Json,

    /// Status string, written verbatim (see [`status`])
    pub status: String,

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

    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Image URLs as a string list.
    #[must_use]
    pub fn image_url_list(&self) -> Vec<String> {
        super::image_urls_from_json(&self.image_urls)
    }
}
