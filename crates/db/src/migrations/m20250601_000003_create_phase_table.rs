//! Create phase table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phase::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Phase::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Phase::ProjectId).string_len(32).not_null())
                    .col(ColumnDef::new(Phase::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Phase::Description).text().not_null())
                    .col(ColumnDef::new(Phase::Sequence).integer().not_null())
                    .col(ColumnDef::new(Phase::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Phase::ImageUrls)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Phase::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Phase::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phase_project")
                            .from(Phase::Table, Phase::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (project_id, sequence) for ordered phase listing
        manager
            .create_index(
                Index::create()
                    .name("idx_phase_project_sequence")
                    .table(Phase::Table)
                    .col(Phase::ProjectId)
                    .col(Phase::Sequence)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Phase::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Phase {
    Table,
    Id,
    ProjectId,
    Name,
    Description,
    Sequence,
    Status,
    ImageUrls,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Project {
    Table,
    Id,
}
