//! Create product table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::OwnerId).string_len(32).not_null())
                    .col(ColumnDef::new(Product::ProjectId).string_len(32).not_null())
                    .col(ColumnDef::new(Product::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Product::Description).text().not_null())
                    .col(ColumnDef::new(Product::Price).big_integer().not_null())
                    .col(ColumnDef::new(Product::Unit).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Product::ImageUrls)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Product::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Product::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_owner")
                            .from(Product::Table, Product::OwnerId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_project")
                            .from(Product::Table, Product::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: owner_id (for listing an account's products)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_owner_id")
                    .table(Product::Table)
                    .col(Product::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index: project_id (for cascade collection and project pages)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_project_id")
                    .table(Product::Table)
                    .col(Product::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Product {
    Table,
    Id,
    OwnerId,
    ProjectId,
    Name,
    Description,
    Price,
    Unit,
    ImageUrls,
    Status,
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
