//! Employee service - Handles employee and enrollment use cases.
//!
//! Orchestrates validation, reconciliation and persistence via Unit of Work.
//! Every storage round trip is bounded by the configured store timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{
    Benefit, CreateEmployeeRequest, Employee, EmployeeBenefit, EmployeeFilter, EmployeeId,
    EmployeeQuery, EnrollBenefitRequest, NameMatch, NewEmployee, UpdateEmployeeRequest,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PageRequest;
use crate::validation::{validate_create, validate_enrollment, validate_update};

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Filtered, paginated employees ordered by id
    async fn list_employees(&self, query: EmployeeQuery) -> AppResult<Vec<Employee>>;

    /// Employee by id with enrollments
    async fn get_employee(&self, id: EmployeeId) -> AppResult<Employee>;

    /// Validate and create an employee with its initial enrollments
    async fn create_employee(&self, request: CreateEmployeeRequest) -> AppResult<Employee>;

    /// Validate, reconcile and persist contact details of an employee
    async fn update_employee(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeRequest,
    ) -> AppResult<Employee>;

    /// Delete an employee and its enrollments
    async fn delete_employee(&self, id: EmployeeId) -> AppResult<()>;

    /// Enrollments of an employee
    async fn get_benefits(&self, id: EmployeeId) -> AppResult<Vec<EmployeeBenefit>>;

    /// Enroll an employee in a benefit
    async fn enroll_benefit(
        &self,
        id: EmployeeId,
        request: EnrollBenefitRequest,
    ) -> AppResult<EmployeeBenefit>;

    /// All benefit offerings
    async fn list_benefits(&self) -> AppResult<Vec<Benefit>>;
}

/// Knobs the service applies on top of the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Largest page size passed down to the repository
    pub max_page_size: u64,
    pub name_match: NameMatch,
    /// Upper bound for each storage round trip
    pub store_timeout: Duration,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_page_size: config.max_page_size,
            name_match: config.name_match,
            store_timeout: config.store_timeout,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Concrete implementation of EmployeeService using Unit of Work.
pub struct EmployeeManager<U: UnitOfWork + ?Sized> {
    uow: Arc<U>,
    settings: ServiceSettings,
}

impl<U: UnitOfWork + ?Sized> EmployeeManager<U> {
    /// Create new employee service instance with Unit of Work
    pub fn new(uow: Arc<U>, settings: ServiceSettings) -> Self {
        Self { uow, settings }
    }

    /// Run a storage operation under the store timeout
    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send,
    {
        match tokio::time::timeout(self.settings.store_timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.settings.store_timeout.as_millis() as u64,
                    "Storage operation timed out"
                );
                Err(AppError::Timeout)
            }
        }
    }
}

/// Log a rejected request at the level its class deserves
fn log_rejection(operation: &'static str, error: &AppError) {
    match error {
        AppError::Validation(failure) => warn!(operation, %failure, "Request failed validation"),
        AppError::NotFound => warn!(operation, "Employee not found"),
        AppError::Conflict(entity) => warn!(operation, %entity, "Conflicting write"),
        _ => {}
    }
}

#[async_trait]
impl<U: UnitOfWork + ?Sized> EmployeeService for EmployeeManager<U> {
    async fn list_employees(&self, query: EmployeeQuery) -> AppResult<Vec<Employee>> {
        let filter = EmployeeFilter::new(
            query.first_name_contains,
            query.last_name_contains,
            self.settings.name_match,
        );
        let page = PageRequest::new(query.page, query.page_size).capped(self.settings.max_page_size);
        debug!(?filter, ?page, "Listing employees");

        let employees = self.uow.employees();
        self.bounded("list_employees", employees.list(&filter, page))
            .await
    }

    async fn get_employee(&self, id: EmployeeId) -> AppResult<Employee> {
        let employees = self.uow.employees();
        self.bounded("get_employee", employees.find_by_id(id))
            .await?
            .ok_or_not_found()
            .inspect_err(|e| log_rejection("get_employee", e))
    }

    async fn create_employee(&self, request: CreateEmployeeRequest) -> AppResult<Employee> {
        let benefits = self.uow.benefits();
        self.bounded("validate_create", validate_create(&request, benefits.as_ref()))
            .await
            .inspect_err(|e| log_rejection("create_employee", e))?;

        let employees = self.uow.employees();
        let created = self
            .bounded("create_employee", employees.create(NewEmployee::from(request)))
            .await
            .inspect_err(|e| log_rejection("create_employee", e))?;

        info!(
            employee_id = created.id,
            enrollments = created.benefits.len(),
            "Employee created"
        );
        Ok(created)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeRequest,
    ) -> AppResult<Employee> {
        let employees = self.uow.employees();
        let mut employee = self
            .bounded("validate_update", validate_update(&request, id, employees.as_ref()))
            .await
            .map_err(AppError::employee_not_found_as_not_found)
            .inspect_err(|e| log_rejection("update_employee", e))?;

        employee.reconcile(&request);

        let updated = self
            .bounded("update_employee", employees.update(&employee))
            .await
            .inspect_err(|e| log_rejection("update_employee", e))?;

        info!(employee_id = id, "Employee updated");
        Ok(updated)
    }

    async fn delete_employee(&self, id: EmployeeId) -> AppResult<()> {
        let employees = self.uow.employees();
        self.bounded("delete_employee", employees.delete(id))
            .await
            .inspect_err(|e| log_rejection("delete_employee", e))?;

        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    async fn get_benefits(&self, id: EmployeeId) -> AppResult<Vec<EmployeeBenefit>> {
        let employees = self.uow.employees();
        self.bounded("get_benefits", employees.benefits_for(id))
            .await?
            .ok_or_not_found()
            .inspect_err(|e| log_rejection("get_benefits", e))
    }

    async fn enroll_benefit(
        &self,
        id: EmployeeId,
        request: EnrollBenefitRequest,
    ) -> AppResult<EmployeeBenefit> {
        let employees = self.uow.employees();
        let benefits = self.uow.benefits();

        self.bounded(
            "validate_enrollment",
            validate_enrollment(&request, id, employees.as_ref(), benefits.as_ref()),
        )
        .await
        .map_err(AppError::employee_not_found_as_not_found)
        .inspect_err(|e| log_rejection("enroll_benefit", e))?;

        let enrollment = self
            .bounded("enroll_benefit", employees.enroll(id, request.into()))
            .await
            .inspect_err(|e| log_rejection("enroll_benefit", e))?;

        info!(
            employee_id = id,
            benefit_id = enrollment.benefit_id(),
            "Employee enrolled in benefit"
        );
        Ok(enrollment)
    }

    async fn list_benefits(&self) -> AppResult<Vec<Benefit>> {
        let benefits = self.uow.benefits();
        self.bounded("list_benefits", benefits.list()).await
    }
}
