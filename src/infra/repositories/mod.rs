//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Two engines implement the traits: SeaORM stores for PostgreSQL and an
//! in-memory store for local runs and tests.

mod benefit_repository;
mod employee_repository;
pub(crate) mod entities;
mod in_memory;

pub use benefit_repository::{BenefitRepository, BenefitStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore, ENROLLMENT_ENTITY};
pub use in_memory::InMemoryStore;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use benefit_repository::MockBenefitRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
