//! Create feed_post table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedPost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedPost::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedPost::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(FeedPost::ProjectId).string_len(32))
                    .col(ColumnDef::new(FeedPost::Content).text().not_null())
                    .col(
                        ColumnDef::new(FeedPost::ImageUrls)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(FeedPost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FeedPost::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_post_author")
                            .from(FeedPost::Table, FeedPost::AuthorId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Posts survive project deletion with a detached link
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_post_project")
                            .from(FeedPost::Table, FeedPost::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: author_id (for profile feeds)
        manager
            .create_index(
                Index::create()
                    .name("idx_feed_post_author_id")
                    .table(FeedPost::Table)
                    .col(FeedPost::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (timeline pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_feed_post_created_at")
                    .table(FeedPost::Table)
                    .col(FeedPost::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedPost::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FeedPost {
    Table,
    Id,
    AuthorId,
    ProjectId,
    Content,
    ImageUrls,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

#[derive(Iden)]
enum Project {
    Table,
    Id,
}
