//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub social_security_number: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl Model {
    /// Convert to the domain entity with the given enrollments attached
    pub fn into_domain(self, benefits: Vec<crate::domain::EmployeeBenefit>) -> crate::domain::Employee {
        crate::domain::Employee {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            social_security_number: self.social_security_number,
            address1: self.address1,
            address2: self.address2,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            phone_number: self.phone_number,
            email: self.email,
            benefits,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
