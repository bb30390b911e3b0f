//! Employee API - employee records and benefit enrollments over REST
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and request/response types
//! - **validation**: Static and state-dependent rules guarding every write
//! - **services**: Application use cases
//! - **infra**: Infrastructure concerns (database, repositories, seed data)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against PostgreSQL
//! cargo run -- serve
//!
//! # Start the server with in-memory storage and sample data
//! cargo run -- serve --in-memory --seed
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Benefit, Employee, EmployeeBenefit};
pub use errors::{AppError, AppResult};
