//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod benefit;
pub mod employee;
pub mod employee_benefit;
