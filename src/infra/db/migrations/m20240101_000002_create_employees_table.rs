//! Migration: Create employees table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Employees::SocialSecurityNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Address1).string().null())
                    .col(ColumnDef::new(Employees::Address2).string().null())
                    .col(ColumnDef::new(Employees::City).string().null())
                    .col(ColumnDef::new(Employees::State).string().null())
                    .col(ColumnDef::new(Employees::ZipCode).string().null())
                    .col(ColumnDef::new(Employees::PhoneNumber).string().null())
                    .col(ColumnDef::new(Employees::Email).string().null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Name filters scan these columns
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_last_name")
                    .table(Employees::Table)
                    .col(Employees::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    SocialSecurityNumber,
    Address1,
    Address2,
    City,
    State,
    ZipCode,
    PhoneNumber,
    Email,
    CreatedAt,
    UpdatedAt,
}
