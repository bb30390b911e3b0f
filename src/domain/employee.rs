//! Employee domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::benefit::{EmployeeBenefit, EmployeeBenefitResponse, EnrollBenefitRequest, NewEnrollment};
use crate::validation::not_blank;

/// Employee identifier (assigned by the store)
pub type EmployeeId = i32;

/// How name filters compare against stored names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    CaseSensitive,
    #[default]
    CaseInsensitive,
}

impl NameMatch {
    /// Check whether `haystack` contains `needle` under this matching mode
    pub fn contains(&self, haystack: &str, needle: &str) -> bool {
        match self {
            NameMatch::CaseSensitive => haystack.contains(needle),
            NameMatch::CaseInsensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

/// Employee domain entity
///
/// Plain data holder; the rules it must satisfy are enforced by
/// [`crate::validation`] before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Immutable once set
    pub social_security_number: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// Enrollments owned by this employee
    pub benefits: Vec<EmployeeBenefit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Check if the first address line holds a non-blank value
    pub fn has_address(&self) -> bool {
        self.address1.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    /// Copy the editable contact fields of an update request onto this employee.
    ///
    /// Identity, names, social security number and enrollments are left as
    /// they are. Absent fields in the request clear the stored value.
    pub fn reconcile(&mut self, update: &UpdateEmployeeRequest) {
        self.address1 = update.address1.clone();
        self.address2 = update.address2.clone();
        self.city = update.city.clone();
        self.state = update.state.clone();
        self.zip_code = update.zip_code.clone();
        self.phone_number = update.phone_number.clone();
        self.email = update.email.clone();
    }
}

/// Employee creation data handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
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
    pub benefits: Vec<NewEnrollment>,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            social_security_number: request.social_security_number,
            address1: request.address1,
            address2: request.address2,
            city: request.city,
            state: request.state,
            zip_code: request.zip_code,
            phone_number: request.phone_number,
            email: request.email,
            benefits: request.benefits.into_iter().map(NewEnrollment::from).collect(),
        }
    }
}

/// Name filter applied by `EmployeeRepository::list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub first_name_contains: Option<String>,
    pub last_name_contains: Option<String>,
    pub matching: NameMatch,
}

impl EmployeeFilter {
    /// Build a filter; blank substrings are dropped
    pub fn new(
        first_name_contains: Option<String>,
        last_name_contains: Option<String>,
        matching: NameMatch,
    ) -> Self {
        Self {
            first_name_contains: first_name_contains.filter(|s| !s.trim().is_empty()),
            last_name_contains: last_name_contains.filter(|s| !s.trim().is_empty()),
            matching,
        }
    }

    /// Check an employee against every configured substring
    pub fn matches(&self, employee: &Employee) -> bool {
        let first = self
            .first_name_contains
            .as_deref()
            .map_or(true, |needle| self.matching.contains(&employee.first_name, needle));
        let last = self
            .last_name_contains
            .as_deref()
            .map_or(true, |needle| self.matching.contains(&employee.last_name, needle));
        first && last
    }
}

/// Employee listing query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Only employees whose first name contains this text
    pub first_name_contains: Option<String>,
    /// Only employees whose last name contains this text
    pub last_name_contains: Option<String>,
    /// Page number, starting at 1 (values below 1 are treated as 1)
    pub page: Option<i64>,
    /// Employees per page (values below 1 are treated as 1)
    #[serde(alias = "records_per_page")]
    pub page_size: Option<i64>,
}

/// Employee creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "John")]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "123-45-6789")]
    pub social_security_number: String,
    #[schema(example = "123 Main St")]
    pub address1: Option<String>,
    pub address2: Option<String>,
    #[schema(example = "Anytown")]
    pub city: Option<String>,
    #[schema(example = "NY")]
    pub state: Option<String>,
    #[schema(example = "12345")]
    pub zip_code: Option<String>,
    #[schema(example = "555-123-4567")]
    pub phone_number: Option<String>,
    #[schema(example = "john.doe@example.com")]
    pub email: Option<String>,
    /// Benefits to enroll in together with the employee
    #[serde(default)]
    pub benefits: Vec<EnrollBenefitRequest>,
}

/// Employee update data transfer object
///
/// Carries only the editable contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[schema(example = "123 Main St")]
    pub address1: Option<String>,
    pub address2: Option<String>,
    #[schema(example = "Anytown")]
    pub city: Option<String>,
    #[schema(example = "NY")]
    pub state: Option<String>,
    #[schema(example = "12345")]
    pub zip_code: Option<String>,
    #[schema(example = "555-123-4567")]
    pub phone_number: Option<String>,
    #[schema(example = "john.doe@example.com")]
    pub email: Option<String>,
}

/// Employee response (safe to return to client, omits the SSN)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: EmployeeId,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub benefits: Vec<EmployeeBenefitResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            address1: employee.address1.clone(),
            address2: employee.address2.clone(),
            city: employee.city.clone(),
            state: employee.state.clone(),
            zip_code: employee.zip_code.clone(),
            phone_number: employee.phone_number.clone(),
            email: employee.email.clone(),
            benefits: employee.benefits.iter().map(EmployeeBenefitResponse::from).collect(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self::from(&employee)
    }
}
