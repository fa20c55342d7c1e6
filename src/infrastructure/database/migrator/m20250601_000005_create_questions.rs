//! Create questions table

use sea_orm_migration::prelude::*;

use super::m20250601_000004_create_modules::Modules;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::BlockType).string().not_null())
                    .col(ColumnDef::new(Questions::Statement).text().not_null())
                    .col(ColumnDef::new(Questions::Description).text())
                    .col(ColumnDef::new(Questions::ResourceUrl).string())
                    .col(ColumnDef::new(Questions::DynamicType).string().not_null())
                    .col(ColumnDef::new(Questions::QuestionType).string().not_null())
                    .col(ColumnDef::new(Questions::Feedback).text().not_null())
                    .col(ColumnDef::new(Questions::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_module_id")
                            .from(Questions::Table, Questions::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_module_id")
                    .table(Questions::Table)
                    .col(Questions::ModuleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Questions {
    Table,
    Id,
    BlockType,
    Statement,
    Description,
    ResourceUrl,
    DynamicType,
    QuestionType,
    Feedback,
    ModuleId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
