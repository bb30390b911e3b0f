//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Entities here are plain data holders; the rules they must satisfy live
//! in [`crate::validation`].

pub mod benefit;
pub mod employee;

pub use benefit::{
    Benefit, BenefitId, BenefitResponse, EmployeeBenefit, EmployeeBenefitResponse,
    EnrollBenefitRequest, EnrollmentId, NewBenefit, NewEnrollment,
};
pub use employee::{
    CreateEmployeeRequest, Employee, EmployeeFilter, EmployeeId, EmployeeQuery, EmployeeResponse,
    NameMatch, NewEmployee, UpdateEmployeeRequest,
};
