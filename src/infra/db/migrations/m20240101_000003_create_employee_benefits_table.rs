//! Migration: Create employee_benefits enrollment table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_benefits_table::Benefits;
use super::m20240101_000002_create_employees_table::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeeBenefits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeBenefits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmployeeBenefits::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(EmployeeBenefits::BenefitId).integer().not_null())
                    .col(
                        ColumnDef::new(EmployeeBenefits::CostOverride)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_benefits_employee")
                            .from(EmployeeBenefits::Table, EmployeeBenefits::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_benefits_benefit")
                            .from(EmployeeBenefits::Table, EmployeeBenefits::BenefitId)
                            .to(Benefits::Table, Benefits::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment per (employee, benefit)
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_benefits_employee_benefit")
                    .table(EmployeeBenefits::Table)
                    .col(EmployeeBenefits::EmployeeId)
                    .col(EmployeeBenefits::BenefitId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeBenefits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EmployeeBenefits {
    Table,
    Id,
    EmployeeId,
    BenefitId,
    CostOverride,
}
