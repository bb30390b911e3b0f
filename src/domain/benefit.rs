//! Benefit reference data and employee enrollments.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::employee::EmployeeId;

/// Benefit identifier
pub type BenefitId = i32;

/// Enrollment (employee benefit) identifier
pub type EnrollmentId = i32;

/// A benefit offering such as health or dental coverage.
///
/// Reference data: created by the seed loader and read by everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benefit {
    pub id: BenefitId,
    /// Unique benefit name
    pub name: String,
    pub description: Option<String>,
    /// Cost charged when an enrollment carries no override
    pub base_cost: Decimal,
}

/// Benefit creation data (seed loader only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBenefit {
    pub name: String,
    pub description: Option<String>,
    pub base_cost: Decimal,
}

impl NewBenefit {
    pub fn new(name: impl Into<String>, description: impl Into<String>, base_cost: Decimal) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            base_cost,
        }
    }
}

/// Enrollment of one employee in one benefit.
///
/// The benefit is shared reference data; every enrollment of the same
/// benefit loaded together points at the same `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeBenefit {
    pub id: EnrollmentId,
    pub employee_id: EmployeeId,
    pub benefit: Arc<Benefit>,
    /// Per-employee cost; `None` means the benefit's base cost applies
    pub cost_override: Option<Decimal>,
}

impl EmployeeBenefit {
    /// Identifier of the enrolled benefit
    pub fn benefit_id(&self) -> BenefitId {
        self.benefit.id
    }

    /// Effective cost to the employee
    pub fn cost(&self) -> Decimal {
        self.cost_override.unwrap_or(self.benefit.base_cost)
    }
}

/// Enrollment creation data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEnrollment {
    pub benefit_id: BenefitId,
    pub cost_override: Option<Decimal>,
}

/// Benefit enrollment request (standalone or nested in employee creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub struct EnrollBenefitRequest {
    /// Benefit to enroll in
    #[schema(example = 1)]
    pub benefit_id: BenefitId,
    /// Cost to the employee, when it differs from the benefit's base cost
    #[serde(default)]
    #[schema(example = "120.00")]
    pub cost_override: Option<Decimal>,
}

impl From<EnrollBenefitRequest> for NewEnrollment {
    fn from(request: EnrollBenefitRequest) -> Self {
        Self {
            benefit_id: request.benefit_id,
            cost_override: request.cost_override,
        }
    }
}

/// Benefit reference data as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BenefitResponse {
    #[schema(example = 1)]
    pub id: BenefitId,
    #[schema(example = "Health")]
    pub name: String,
    #[schema(example = "Medical, dental, and vision coverage")]
    pub description: Option<String>,
    #[schema(example = "100.00")]
    pub base_cost: Decimal,
}

impl From<&Benefit> for BenefitResponse {
    fn from(benefit: &Benefit) -> Self {
        Self {
            id: benefit.id,
            name: benefit.name.clone(),
            description: benefit.description.clone(),
            base_cost: benefit.base_cost,
        }
    }
}

/// Employee enrollment as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeBenefitResponse {
    /// Enrollment identifier
    #[schema(example = 1)]
    pub id: EnrollmentId,
    #[schema(example = 1)]
    pub employee_id: EmployeeId,
    #[schema(example = 1)]
    pub benefit_id: BenefitId,
    /// Benefit name
    #[schema(example = "Health")]
    pub name: String,
    /// Effective cost to the employee
    #[schema(example = "100.00")]
    pub cost: Decimal,
}

impl From<&EmployeeBenefit> for EmployeeBenefitResponse {
    fn from(enrollment: &EmployeeBenefit) -> Self {
        Self {
            id: enrollment.id,
            employee_id: enrollment.employee_id,
            benefit_id: enrollment.benefit_id(),
            name: enrollment.benefit.name.clone(),
            cost: enrollment.cost(),
        }
    }
}
