//! In-memory repository implementation.
//!
//! Implements both repository traits over `BTreeMap`s guarded by a single
//! `tokio::sync::RwLock`, enforcing the same constraints as the database
//! schema: unique benefit names, one enrollment per (employee, benefit) and
//! cascading deletes. Used by `serve --in-memory` and by the tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{BenefitRepository, EmployeeRepository, ENROLLMENT_ENTITY};
use crate::domain::{
    Benefit, BenefitId, Employee, EmployeeBenefit, EmployeeFilter, EmployeeId, EnrollmentId,
    NewBenefit, NewEmployee, NewEnrollment,
};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[derive(Debug, Clone)]
struct EnrollmentRow {
    id: EnrollmentId,
    employee_id: EmployeeId,
    benefit_id: BenefitId,
    cost_override: Option<Decimal>,
}

#[derive(Debug, Default)]
struct State {
    /// Employees without enrollments; those are attached on read
    employees: BTreeMap<EmployeeId, Employee>,
    benefits: BTreeMap<BenefitId, Arc<Benefit>>,
    enrollments: BTreeMap<EnrollmentId, EnrollmentRow>,
    last_employee_id: EmployeeId,
    last_benefit_id: BenefitId,
    last_enrollment_id: EnrollmentId,
}

impl State {
    fn enrollments_of(&self, employee_id: EmployeeId) -> AppResult<Vec<EmployeeBenefit>> {
        self.enrollments
            .values()
            .filter(|row| row.employee_id == employee_id)
            .map(|row| self.to_enrollment(row))
            .collect()
    }

    fn to_enrollment(&self, row: &EnrollmentRow) -> AppResult<EmployeeBenefit> {
        let benefit = self.benefits.get(&row.benefit_id).cloned().ok_or_else(|| {
            AppError::internal(format!(
                "enrollment {} references missing benefit {}",
                row.id, row.benefit_id
            ))
        })?;

        Ok(EmployeeBenefit {
            id: row.id,
            employee_id: row.employee_id,
            benefit,
            cost_override: row.cost_override,
        })
    }

    fn hydrate(&self, employee: &Employee) -> AppResult<Employee> {
        let mut employee = employee.clone();
        employee.benefits = self.enrollments_of(employee.id)?;
        Ok(employee)
    }

    fn is_enrolled(&self, employee_id: EmployeeId, benefit_id: BenefitId) -> bool {
        self.enrollments
            .values()
            .any(|row| row.employee_id == employee_id && row.benefit_id == benefit_id)
    }

    fn insert_enrollment(
        &mut self,
        employee_id: EmployeeId,
        enrollment: NewEnrollment,
    ) -> AppResult<EnrollmentRow> {
        if !self.benefits.contains_key(&enrollment.benefit_id) {
            return Err(AppError::internal(format!(
                "benefit {} does not exist",
                enrollment.benefit_id
            )));
        }
        if self.is_enrolled(employee_id, enrollment.benefit_id) {
            return Err(AppError::conflict(ENROLLMENT_ENTITY));
        }

        self.last_enrollment_id += 1;
        let row = EnrollmentRow {
            id: self.last_enrollment_id,
            employee_id,
            benefit_id: enrollment.benefit_id,
            cost_override: enrollment.cost_override,
        };
        self.enrollments.insert(row.id, row.clone());
        Ok(row)
    }
}

/// Shared in-memory store; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored enrollments across all employees
    pub async fn enrollment_count(&self) -> usize {
        self.state.read().await.enrollments.len()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn list(&self, filter: &EmployeeFilter, page: PageRequest) -> AppResult<Vec<Employee>> {
        let state = self.state.read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        state
            .employees
            .values()
            .filter(|e| filter.matches(e))
            .skip(offset)
            .take(limit)
            .map(|e| state.hydrate(e))
            .collect()
    }

    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        let state = self.state.read().await;
        state.employees.get(&id).map(|e| state.hydrate(e)).transpose()
    }

    async fn create(&self, new: NewEmployee) -> AppResult<Employee> {
        let mut state = self.state.write().await;

        // check everything before touching state, so a failure leaves nothing behind
        for (i, enrollment) in new.benefits.iter().enumerate() {
            if !state.benefits.contains_key(&enrollment.benefit_id) {
                return Err(AppError::internal(format!(
                    "benefit {} does not exist",
                    enrollment.benefit_id
                )));
            }
            if new.benefits[..i]
                .iter()
                .any(|earlier| earlier.benefit_id == enrollment.benefit_id)
            {
                return Err(AppError::conflict(ENROLLMENT_ENTITY));
            }
        }

        state.last_employee_id += 1;
        let now = Utc::now();
        let employee = Employee {
            id: state.last_employee_id,
            first_name: new.first_name,
            last_name: new.last_name,
            social_security_number: new.social_security_number,
            address1: new.address1,
            address2: new.address2,
            city: new.city,
            state: new.state,
            zip_code: new.zip_code,
            phone_number: new.phone_number,
            email: new.email,
            benefits: vec![],
            created_at: now,
            updated_at: now,
        };
        state.employees.insert(employee.id, employee.clone());

        for enrollment in new.benefits {
            state.insert_enrollment(employee.id, enrollment)?;
        }

        state.hydrate(&employee)
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        let mut state = self.state.write().await;
        let stored = state
            .employees
            .get_mut(&employee.id)
            .ok_or(AppError::NotFound)?;

        stored.address1 = employee.address1.clone();
        stored.address2 = employee.address2.clone();
        stored.city = employee.city.clone();
        stored.state = employee.state.clone();
        stored.zip_code = employee.zip_code.clone();
        stored.phone_number = employee.phone_number.clone();
        stored.email = employee.email.clone();
        stored.updated_at = Utc::now();

        let stored = stored.clone();
        state.hydrate(&stored)
    }

    async fn delete(&self, id: EmployeeId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.employees.remove(&id).is_none() {
            return Err(AppError::NotFound);
        }
        state.enrollments.retain(|_, row| row.employee_id != id);
        Ok(())
    }

    async fn benefits_for(&self, id: EmployeeId) -> AppResult<Option<Vec<EmployeeBenefit>>> {
        let state = self.state.read().await;
        if !state.employees.contains_key(&id) {
            return Ok(None);
        }
        state.enrollments_of(id).map(Some)
    }

    async fn enroll(
        &self,
        employee_id: EmployeeId,
        enrollment: NewEnrollment,
    ) -> AppResult<EmployeeBenefit> {
        let mut state = self.state.write().await;
        if !state.employees.contains_key(&employee_id) {
            return Err(AppError::NotFound);
        }

        let row = state.insert_enrollment(employee_id, enrollment)?;
        state.to_enrollment(&row)
    }
}

#[async_trait]
impl BenefitRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Benefit>> {
        let state = self.state.read().await;
        Ok(state.benefits.values().map(|b| Benefit::clone(b)).collect())
    }

    async fn find_by_ids(&self, ids: &[BenefitId]) -> AppResult<Vec<Benefit>> {
        let state = self.state.read().await;
        Ok(state
            .benefits
            .values()
            .filter(|b| ids.contains(&b.id))
            .map(|b| Benefit::clone(b))
            .collect())
    }

    async fn create(&self, new: NewBenefit) -> AppResult<Benefit> {
        let mut state = self.state.write().await;
        if state.benefits.values().any(|b| b.name == new.name) {
            return Err(AppError::conflict("Benefit"));
        }

        state.last_benefit_id += 1;
        let benefit = Benefit {
            id: state.last_benefit_id,
            name: new.name,
            description: new.description,
            base_cost: new.base_cost,
        };
        state.benefits.insert(benefit.id, Arc::new(benefit.clone()));
        Ok(benefit)
    }
}
