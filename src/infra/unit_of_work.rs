//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories behind one handle the services
//! depend on. Multi-row writes open their own transaction inside the store,
//! so the unit of work itself only hands out repositories and reports health.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::db;
use super::repositories::{
    BenefitRepository, BenefitStore, EmployeeRepository, EmployeeStore, InMemoryStore,
};
use crate::errors::AppResult;

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get employee repository
    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    /// Get benefit repository
    fn benefits(&self) -> Arc<dyn BenefitRepository>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM-backed implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    employee_repo: Arc<EmployeeStore>,
    benefit_repo: Arc<BenefitStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let employee_repo = Arc::new(EmployeeStore::new(db.clone()));
        let benefit_repo = Arc::new(BenefitStore::new(db.clone()));
        Self {
            db,
            employee_repo,
            benefit_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    fn benefits(&self) -> Arc<dyn BenefitRepository> {
        self.benefit_repo.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        Arc::new(self.clone())
    }

    fn benefits(&self) -> Arc<dyn BenefitRepository> {
        Arc::new(self.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
