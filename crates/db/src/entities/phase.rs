//! Phase entity (a stage of a farming project).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Documented phase status values (written verbatim, not validated).
pub mod status {
    pub const NOT_STARTED: &str = "NOT_STARTED";
    pub const RUNNING: &str = "RUNNING";
    pub const DONE: &str = "DONE";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Parent project ID
    #[sea_orm(indexed)]
    pub project_id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Ordering within the project
    pub sequence: i32,

    /// Status string, written verbatim (see [`status`])
    pub status: String,

    /// Image URLs (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub image_urls: Json,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
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
