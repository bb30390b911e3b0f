//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{benefit_handler, employee_handler};
use crate::domain::{
    BenefitResponse, CreateEmployeeRequest, EmployeeBenefitResponse, EmployeeResponse,
    EnrollBenefitRequest, UpdateEmployeeRequest,
};

/// OpenAPI documentation for the Employee API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee API",
        version = "0.1.0",
        description = "Employee records and benefit enrollments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        employee_handler::get_employee_benefits,
        employee_handler::enroll_benefit,
        // Benefit endpoints
        benefit_handler::list_benefits,
    ),
    components(
        schemas(
            EmployeeResponse,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            EnrollBenefitRequest,
            EmployeeBenefitResponse,
            BenefitResponse,
        )
    ),
    tags(
        (name = "Employees", description = "Employee records and their enrollments"),
        (name = "Benefits", description = "Benefit offerings")
    )
)]
pub struct ApiDoc;
