//! Migration to create units_of_measure table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UnitsOfMeasure::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnitsOfMeasure::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UnitsOfMeasure::Code)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UnitsOfMeasure::Name).string_len(100).not_null())
                    .col(ColumnDef::new(UnitsOfMeasure::Description).string_len(255).null())
                    .col(
                        ColumnDef::new(UnitsOfMeasure::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnitsOfMeasure::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UnitsOfMeasure::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UnitsOfMeasure {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
