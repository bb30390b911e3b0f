//! Employee handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{JsonBody, PathParam, QueryParams};
use crate::api::AppState;
use crate::domain::{
    CreateEmployeeRequest, EmployeeBenefitResponse, EmployeeId, EmployeeQuery, EmployeeResponse,
    EnrollBenefitRequest, UpdateEmployeeRequest,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/:id/benefits", get(get_employee_benefits).post(enroll_benefit))
}

/// List employees, optionally filtered by name
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Page of employees ordered by id", body = Vec<EmployeeResponse>),
        (status = 504, description = "Storage timed out")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<EmployeeQuery>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employee_service.list_employees(query).await?;
    Ok(Json(employees.iter().map(EmployeeResponse::from).collect()))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee with enrollments", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<EmployeeId>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateEmployeeRequest>,
) -> AppResult<Created<EmployeeResponse>> {
    let employee = state.employee_service.create_employee(payload).await?;
    Ok(Created::new(
        format!("/employees/{}", employee.id),
        EmployeeResponse::from(employee),
    ))
}

/// Update an employee's contact details
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<EmployeeId>,
    JsonBody(payload): JsonBody<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employee_service.update_employee(id, payload).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Delete an employee and its enrollments
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    PathParam(id): PathParam<EmployeeId>,
) -> AppResult<NoContent> {
    state.employee_service.delete_employee(id).await?;
    Ok(NoContent)
}

/// Get the benefits an employee is enrolled in
#[utoipa::path(
    get,
    path = "/employees/{id}/benefits",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee enrollments", body = Vec<EmployeeBenefitResponse>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee_benefits(
    State(state): State<AppState>,
    PathParam(id): PathParam<EmployeeId>,
) -> AppResult<Json<Vec<EmployeeBenefitResponse>>> {
    let benefits = state.employee_service.get_benefits(id).await?;
    Ok(Json(benefits.iter().map(EmployeeBenefitResponse::from).collect()))
}

/// Enroll an employee in a benefit
#[utoipa::path(
    post,
    path = "/employees/{id}/benefits",
    tag = "Employees",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = EnrollBenefitRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EmployeeBenefitResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Already enrolled in this benefit")
    )
)]
pub async fn enroll_benefit(
    State(state): State<AppState>,
    PathParam(id): PathParam<EmployeeId>,
    JsonBody(payload): JsonBody<EnrollBenefitRequest>,
) -> AppResult<Created<EmployeeBenefitResponse>> {
    let enrollment = state.employee_service.enroll_benefit(id, payload).await?;
    Ok(Created::new(
        format!("/employees/{}/benefits", id),
        EmployeeBenefitResponse::from(&enrollment),
    ))
}
