//! Migration: Create benefits reference table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Benefits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Benefits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Benefits::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Benefits::Description).text().null())
                    .col(
                        ColumnDef::new(Benefits::BaseCost)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Benefits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Benefits {
    Table,
    Id,
    Name,
    Description,
    BaseCost,
}
