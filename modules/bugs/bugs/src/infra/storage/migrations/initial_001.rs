use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bugs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bugs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bugs::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Bugs::Description).text().not_null())
                    .col(
                        ColumnDef::new(Bugs::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Bugs::Priority)
                            .string_len(16)
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Bugs::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Bugs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bugs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bugs_created_at")
                    .table(Bugs::Table)
                    .col(Bugs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bugs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bugs {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
