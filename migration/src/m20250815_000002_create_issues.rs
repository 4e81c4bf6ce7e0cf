use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Issues::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Issues::Title).string().not_null())
                    .col(ColumnDef::new(Issues::Description).text().not_null())
                    .col(
                        ColumnDef::new(Issues::Status)
                            .string_len(16)
                            .not_null()
                            .default("Open"),
                    )
                    .col(
                        ColumnDef::new(Issues::Priority)
                            .string_len(16)
                            .not_null()
                            .default("Medium"),
                    )
                    .col(
                        ColumnDef::new(Issues::Severity)
                            .string_len(16)
                            .not_null()
                            .default("Major"),
                    )
                    .col(ColumnDef::new(Issues::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(Issues::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Issues::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issues_created_by")
                            .from(Issues::Table, Issues::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_issues_status")
                    .table(Issues::Table)
                    .col(Issues::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_issues_created_by")
                    .table(Issues::Table)
                    .col(Issues::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_issues_created_at")
                    .table(Issues::Table)
                    .col(Issues::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Issues {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    Severity,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
