//! Benefit database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Benefit;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "benefits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub base_cost: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_benefit::Entity")]
    EmployeeBenefits,
}

impl Related<super::employee_benefit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeBenefits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Benefit {
    fn from(model: Model) -> Self {
        Benefit {
            id: model.id,
            name: model.name,
            description: model.description,
            base_cost: model.base_cost,
        }
    }
}
