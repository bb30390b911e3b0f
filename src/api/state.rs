//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::UnitOfWork;
use crate::services::{EmployeeManager, EmployeeService, ServiceSettings};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Employee and enrollment use cases
    pub employee_service: Arc<dyn EmployeeService>,
    /// Storage handle, used for health checks
    pub uow: Arc<dyn UnitOfWork>,
}

impl AppState {
    /// Build the services on top of a storage engine.
    pub fn from_config<U: UnitOfWork + 'static>(uow: Arc<U>, config: &Config) -> Self {
        let employee_service = Arc::new(EmployeeManager::new(
            uow.clone(),
            ServiceSettings::from(config),
        ));

        Self {
            employee_service,
            uow,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(employee_service: Arc<dyn EmployeeService>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self {
            employee_service,
            uow,
        }
    }
}
