//! Create like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Like::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Like::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(Like::FeedId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Like::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_account")
                            .from(Like::Table, Like::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_feed_post")
                            .from(Like::Table, Like::FeedId)
                            .to(FeedPost::Table, FeedPost::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (account_id, feed_id) - one like per account per post.
        // Concurrent duplicate inserts resolve here, not in application code.
        manager
            .create_index(
                Index::create()
                    .name("idx_like_account_feed")
                    .table(Like::Table)
                    .col(Like::AccountId)
                    .col(Like::FeedId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: feed_id (for counting a post's likes)
        manager
            .create_index(
                Index::create()
                    .name("idx_like_feed_id")
                    .table(Like::Table)
                    .col(Like::FeedId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Like::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Like {
    Table,
    Id,
    AccountId,
    FeedId,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

#[derive(Iden)]
enum FeedPost {
    Table,
    Id,
}
