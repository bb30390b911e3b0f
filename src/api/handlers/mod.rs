//! HTTP request handlers.

pub mod benefit_handler;
pub mod employee_handler;

pub use benefit_handler::benefit_routes;
pub use employee_handler::employee_routes;
