//! Create guides table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guides::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guides::Name).string().not_null())
                    .col(ColumnDef::new(Guides::Description).text().not_null())
                    .col(ColumnDef::new(Guides::Difficulty).string().not_null())
                    .col(
                        ColumnDef::new(Guides::EstimatedDuration)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Guides::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Guides::Language).string().not_null())
                    .col(ColumnDef::new(Guides::Points).integer().not_null())
                    .col(
                        ColumnDef::new(Guides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Guides::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Guides::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guides_status")
                    .table(Guides::Table)
                    .col(Guides::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Guides {
    Table,
    Id,
    Name,
    Description,
    Difficulty,
    EstimatedDuration,
    Status,
    Language,
    Points,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
