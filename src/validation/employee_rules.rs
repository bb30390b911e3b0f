//! Rule sets for employee writes.
//!
//! Static checks come from the `validator` derive on the request types;
//! checks that need persisted state read through the repositories handed in
//! by the caller and then run as [`RulePipeline`] stages.

use std::collections::{BTreeSet, HashSet};

use validator::Validate;

use super::failure::{ValidationFailure, Violation};
use super::pipeline::RulePipeline;
use crate::domain::{
    BenefitId, CreateEmployeeRequest, Employee, EmployeeId, EnrollBenefitRequest,
    UpdateEmployeeRequest,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{BenefitRepository, EmployeeRepository};

pub const EMPLOYEE_EXISTS: &str = "employee_exists";
pub const ADDRESS_RETAINED: &str = "address_retained";
pub const REQUIRED_FIELDS: &str = "required_fields";
pub const DISTINCT_BENEFITS: &str = "distinct_benefits";
pub const BENEFITS_EXIST: &str = "benefits_exist";
pub const BENEFIT_EXISTS: &str = "benefit_exists";

const BENEFITS_FIELD: &str = "Benefits";
const BENEFIT_ID_FIELD: &str = "BenefitId";
const ADDRESS1_FIELD: &str = "Address1";

// =============================================================================
// Update
// =============================================================================

/// State an update request is checked against
pub struct UpdateContext<'a> {
    pub request: &'a UpdateEmployeeRequest,
    /// The persisted employee, `None` when the target id does not resolve
    pub existing: Option<&'a Employee>,
}

pub fn update_pipeline<'a>() -> RulePipeline<UpdateContext<'a>> {
    RulePipeline::new()
        .stage(EMPLOYEE_EXISTS, update_target_exists)
        .dependent_stage(ADDRESS_RETAINED, &[EMPLOYEE_EXISTS], address_retained)
}

fn update_target_exists(ctx: &UpdateContext<'_>) -> Vec<Violation> {
    match ctx.existing {
        Some(_) => vec![],
        None => vec![Violation::employee_not_found()],
    }
}

fn address_retained(ctx: &UpdateContext<'_>) -> Vec<Violation> {
    let Some(existing) = ctx.existing else {
        return vec![];
    };
    let cleared = ctx
        .request
        .address1
        .as_deref()
        .map_or(true, |a| a.trim().is_empty());

    if existing.has_address() && cleared {
        vec![Violation::field_required(ADDRESS1_FIELD)]
    } else {
        vec![]
    }
}

/// Check an update request against the employee it targets.
///
/// Looks the employee up once and returns it so the caller can reconcile
/// without a second read. A missing employee is reported as a record-level
/// `EmployeeNotFound` violation and the address rule is not evaluated.
pub async fn validate_update(
    request: &UpdateEmployeeRequest,
    id: EmployeeId,
    employees: &dyn EmployeeRepository,
) -> AppResult<Employee> {
    let existing = employees.find_by_id(id).await?;

    let context = UpdateContext {
        request,
        existing: existing.as_ref(),
    };
    update_pipeline().run(&context).map_err(AppError::Validation)?;

    existing.ok_or(AppError::NotFound)
}

// =============================================================================
// Create
// =============================================================================

/// State a create request is checked against
pub struct CreateContext<'a> {
    pub request: &'a CreateEmployeeRequest,
    /// Ids among the requested benefits that exist in the store
    pub known_benefits: &'a HashSet<BenefitId>,
}

pub fn create_pipeline<'a>() -> RulePipeline<CreateContext<'a>> {
    RulePipeline::new()
        .stage(REQUIRED_FIELDS, required_fields)
        .stage(DISTINCT_BENEFITS, distinct_benefits)
        .dependent_stage(BENEFITS_EXIST, &[DISTINCT_BENEFITS], benefits_exist)
}

fn required_fields(ctx: &CreateContext<'_>) -> Vec<Violation> {
    match ctx.request.validate() {
        Ok(()) => vec![],
        Err(errors) => ValidationFailure::from(errors).violations().to_vec(),
    }
}

fn distinct_benefits(ctx: &CreateContext<'_>) -> Vec<Violation> {
    let mut seen = HashSet::new();
    let mut reported = BTreeSet::new();

    for enrollment in &ctx.request.benefits {
        if !seen.insert(enrollment.benefit_id) {
            reported.insert(enrollment.benefit_id);
        }
    }

    reported
        .into_iter()
        .map(|id| Violation::duplicate_benefit(BENEFITS_FIELD, id))
        .collect()
}

fn benefits_exist(ctx: &CreateContext<'_>) -> Vec<Violation> {
    ctx.request
        .benefits
        .iter()
        .filter(|e| !ctx.known_benefits.contains(&e.benefit_id))
        .map(|e| Violation::unknown_benefit(BENEFITS_FIELD, e.benefit_id))
        .collect()
}

/// Check a create request: required fields, then the benefits it enrolls in.
///
/// All violations are reported together.
pub async fn validate_create(
    request: &CreateEmployeeRequest,
    benefits: &dyn BenefitRepository,
) -> AppResult<()> {
    let known_benefits: HashSet<BenefitId> = if request.benefits.is_empty() {
        HashSet::new()
    } else {
        let ids: Vec<BenefitId> = request
            .benefits
            .iter()
            .map(|e| e.benefit_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        benefits
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|b| b.id)
            .collect()
    };

    let context = CreateContext {
        request,
        known_benefits: &known_benefits,
    };
    let pipeline = create_pipeline();
    pipeline.run(&context).map_err(AppError::Validation)
}

// =============================================================================
// Enroll
// =============================================================================

/// State an enrollment request is checked against
pub struct EnrollContext<'a> {
    pub request: &'a EnrollBenefitRequest,
    pub employee_found: bool,
    pub benefit_found: bool,
}

pub fn enroll_pipeline<'a>() -> RulePipeline<EnrollContext<'a>> {
    RulePipeline::new()
        .stage(EMPLOYEE_EXISTS, enroll_target_exists)
        .dependent_stage(BENEFIT_EXISTS, &[EMPLOYEE_EXISTS], benefit_exists)
}

fn enroll_target_exists(ctx: &EnrollContext<'_>) -> Vec<Violation> {
    if ctx.employee_found {
        vec![]
    } else {
        vec![Violation::employee_not_found()]
    }
}

fn benefit_exists(ctx: &EnrollContext<'_>) -> Vec<Violation> {
    if ctx.benefit_found {
        vec![]
    } else {
        vec![Violation::unknown_benefit(BENEFIT_ID_FIELD, ctx.request.benefit_id)]
    }
}

/// Check that both sides of a new enrollment exist.
///
/// Uniqueness of the (employee, benefit) pair is left to the store.
pub async fn validate_enrollment(
    request: &EnrollBenefitRequest,
    employee_id: EmployeeId,
    employees: &dyn EmployeeRepository,
    benefits: &dyn BenefitRepository,
) -> AppResult<()> {
    let employee_found = employees.find_by_id(employee_id).await?.is_some();
    let benefit_found = if employee_found {
        !benefits.find_by_ids(&[request.benefit_id]).await?.is_empty()
    } else {
        false
    };

    let context = EnrollContext {
        request,
        employee_found,
        benefit_found,
    };
    let pipeline = enroll_pipeline();
    pipeline.run(&context).map_err(AppError::Validation)
}
