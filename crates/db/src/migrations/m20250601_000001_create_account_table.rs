//! Create account table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Account::Username)
                            .string_len(128)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Account::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Account::Email).string_len(256))
                    .col(ColumnDef::new(Account::Phone).string_len(64))
                    .col(ColumnDef::new(Account::AvatarUrl).string_len(1024))
                    .col(ColumnDef::new(Account::Bio).text())
                    .col(ColumnDef::new(Account::Token).string_len(64).unique_key())
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Account::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: token lookup on every authenticated request
        manager
            .create_index(
                Index::create()
                    .name("idx_account_token")
                    .table(Account::Table)
                    .col(Account::Token)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    Username,
    Name,
    Email,
    Phone,
    AvatarUrl,
    Bio,
    Token,
    CreatedAt,
    UpdatedAt,
}
