//! Reference benefits and sample employees.
//!
//! Each part is only inserted when its table is empty, so seeding twice
//! changes nothing.

use rust_decimal::Decimal;

use super::unit_of_work::UnitOfWork;
use crate::domain::{Benefit, EmployeeFilter, NewBenefit, NewEmployee, NewEnrollment};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

/// What a seed run inserted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub benefits: usize,
    pub employees: usize,
}

fn reference_benefits() -> Vec<NewBenefit> {
    vec![
        NewBenefit::new(
            "Health",
            "Medical, dental, and vision coverage",
            Decimal::new(10000, 2),
        ),
        NewBenefit::new("Dental", "Dental coverage", Decimal::new(5000, 2)),
        NewBenefit::new("Vision", "Vision coverage", Decimal::new(3000, 2)),
    ]
}

fn find<'a>(benefits: &'a [Benefit], name: &str) -> AppResult<&'a Benefit> {
    benefits
        .iter()
        .find(|b| b.name == name)
        .ok_or_else(|| AppError::internal(format!("reference benefit {} is missing", name)))
}

fn sample_employees(benefits: &[Benefit]) -> AppResult<Vec<NewEmployee>> {
    let health = find(benefits, "Health")?;
    let dental = find(benefits, "Dental")?;
    let vision = find(benefits, "Vision")?;

    Ok(vec![
        NewEmployee {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            social_security_number: "123-45-6789".to_string(),
            address1: Some("123 Main St".to_string()),
            address2: None,
            city: Some("Anytown".to_string()),
            state: Some("NY".to_string()),
            zip_code: Some("12345".to_string()),
            phone_number: Some("555-123-4567".to_string()),
            email: Some("john.doe@example.com".to_string()),
            benefits: vec![
                NewEnrollment {
                    benefit_id: health.id,
                    cost_override: Some(Decimal::new(100, 0)),
                },
                NewEnrollment {
                    benefit_id: dental.id,
                    cost_override: None,
                },
            ],
        },
        NewEmployee {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            social_security_number: "987-65-4321".to_string(),
            address1: Some("456 Elm St".to_string()),
            address2: Some("Apt 2B".to_string()),
            city: Some("Othertown".to_string()),
            state: Some("CA".to_string()),
            zip_code: Some("98765".to_string()),
            phone_number: Some("555-987-6543".to_string()),
            email: Some("jane.smith@example.com".to_string()),
            benefits: vec![
                NewEnrollment {
                    benefit_id: health.id,
                    cost_override: Some(Decimal::new(120, 0)),
                },
                NewEnrollment {
                    benefit_id: vision.id,
                    cost_override: None,
                },
            ],
        },
    ])
}

/// Insert reference benefits and sample employees where missing
pub async fn seed(uow: &dyn UnitOfWork) -> AppResult<SeedReport> {
    let benefit_repo = uow.benefits();
    let employee_repo = uow.employees();
    let mut report = SeedReport::default();

    if benefit_repo.list().await?.is_empty() {
        for benefit in reference_benefits() {
            benefit_repo.create(benefit).await?;
            report.benefits += 1;
        }
    }

    let any_employee = employee_repo
        .list(&EmployeeFilter::default(), PageRequest::new(Some(1), Some(1)))
        .await?;
    if any_employee.is_empty() {
        let benefits = benefit_repo.list().await?;
        for employee in sample_employees(&benefits)? {
            employee_repo.create(employee).await?;
            report.employees += 1;
        }
    }

    tracing::info!(
        benefits = report.benefits,
        employees = report.employees,
        "Seed data applied"
    );
    Ok(report)
}
