//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories (PostgreSQL and in-memory)
//! - Unit of Work handing repositories to the services
//! - Seed data

pub mod db;
pub mod repositories;
pub mod seed;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    BenefitRepository, BenefitStore, EmployeeRepository, EmployeeStore, InMemoryStore,
};
pub use seed::{seed, SeedReport};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockBenefitRepository, MockEmployeeRepository};
