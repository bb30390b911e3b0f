//! Employee repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IsolationLevel, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, SqlErr, TransactionTrait,
};

use super::entities::{benefit, employee, employee_benefit};
use crate::domain::{
    Benefit, Employee, EmployeeBenefit, EmployeeFilter, EmployeeId, NameMatch, NewEmployee,
    NewEnrollment,
};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity name reported when an (employee, benefit) pair is enrolled twice
pub const ENROLLMENT_ENTITY: &str = "Benefit enrollment";

/// Employee repository trait for dependency injection.
///
/// Every read that returns an [`Employee`] returns it with its benefit
/// enrollments attached.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Employees matching `filter`, ordered by id, skipping `page.offset()`
    /// and returning at most `page.limit()` records. Enrollments attached.
    async fn list(&self, filter: &EmployeeFilter, page: PageRequest) -> AppResult<Vec<Employee>>;

    /// Employee by id, enrollments attached
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>>;

    /// Insert an employee together with its enrollments, atomically.
    /// Returns the stored record with generated ids, enrollments attached.
    async fn create(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// Persist the editable contact fields of an existing employee.
    /// `NotFound` if it no longer exists. Enrollments attached.
    async fn update(&self, employee: &Employee) -> AppResult<Employee>;

    /// Remove an employee and every enrollment it owns, atomically.
    /// `NotFound` if absent.
    async fn delete(&self, id: EmployeeId) -> AppResult<()>;

    /// Enrollments of an employee, `None` when the employee does not exist
    async fn benefits_for(&self, id: EmployeeId) -> AppResult<Option<Vec<EmployeeBenefit>>>;

    /// Enroll an employee in a benefit.
    /// `Conflict` when the pair is already enrolled.
    async fn enroll(
        &self,
        employee_id: EmployeeId,
        enrollment: NewEnrollment,
    ) -> AppResult<EmployeeBenefit>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)
    }
}

/// Commit on success, roll back on error
async fn finish<T>(txn: DatabaseTransaction, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Escape LIKE wildcards so filter text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains(column: employee::Column, needle: &str, matching: NameMatch) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    match matching {
        NameMatch::CaseSensitive => Expr::col(column).like(LikeExpr::new(pattern).escape('\\')),
        NameMatch::CaseInsensitive => Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(pattern.to_lowercase()).escape('\\')),
    }
}

/// Load enrollments for the given employees, grouped by employee id.
///
/// Enrollments of the same benefit share one `Arc<Benefit>`.
async fn load_enrollments<C: ConnectionTrait>(
    db: &C,
    employee_ids: &[EmployeeId],
) -> AppResult<HashMap<EmployeeId, Vec<EmployeeBenefit>>> {
    if employee_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = employee_benefit::Entity::find()
        .filter(employee_benefit::Column::EmployeeId.is_in(employee_ids.iter().copied()))
        .find_also_related(benefit::Entity)
        .order_by_asc(employee_benefit::Column::Id)
        .all(db)
        .await?;

    let mut shared: HashMap<i32, Arc<Benefit>> = HashMap::new();
    let mut grouped: HashMap<EmployeeId, Vec<EmployeeBenefit>> = HashMap::new();

    for (enrollment, benefit) in rows {
        let Some(benefit) = benefit else {
            return Err(AppError::internal(format!(
                "enrollment {} references missing benefit {}",
                enrollment.id, enrollment.benefit_id
            )));
        };
        let benefit = shared
            .entry(benefit.id)
            .or_insert_with(|| Arc::new(Benefit::from(benefit)))
            .clone();

        grouped
            .entry(enrollment.employee_id)
            .or_default()
            .push(EmployeeBenefit {
                id: enrollment.id,
                employee_id: enrollment.employee_id,
                benefit,
                cost_override: enrollment.cost_override,
            });
    }

    Ok(grouped)
}

async fn attach_one<C: ConnectionTrait>(db: &C, model: employee::Model) -> AppResult<Employee> {
    let benefits = load_enrollments(db, &[model.id])
        .await?
        .remove(&model.id)
        .unwrap_or_default();
    Ok(model.into_domain(benefits))
}

async fn insert_employee(txn: &DatabaseTransaction, new: NewEmployee) -> AppResult<Employee> {
    let now = Utc::now();
    let model = employee::ActiveModel {
        id: NotSet,
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        social_security_number: Set(new.social_security_number),
        address1: Set(new.address1),
        address2: Set(new.address2),
        city: Set(new.city),
        state: Set(new.state),
        zip_code: Set(new.zip_code),
        phone_number: Set(new.phone_number),
        email: Set(new.email),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;

    for enrollment in new.benefits {
        employee_benefit::ActiveModel {
            id: NotSet,
            employee_id: Set(model.id),
            benefit_id: Set(enrollment.benefit_id),
            cost_override: Set(enrollment.cost_override),
        }
        .insert(txn)
        .await
        .map_err(|e| AppError::from_write(e, ENROLLMENT_ENTITY))?;
    }

    attach_one(txn, model).await
}

/// Filtered page of employees ordered by id
fn list_query(filter: &EmployeeFilter, page: PageRequest) -> Select<employee::Entity> {
    let mut query = employee::Entity::find();
    if let Some(first) = filter.first_name_contains.as_deref() {
        query = query.filter(contains(employee::Column::FirstName, first, filter.matching));
    }
    if let Some(last) = filter.last_name_contains.as_deref() {
        query = query.filter(contains(employee::Column::LastName, last, filter.matching));
    }

    query
        .order_by_asc(employee::Column::Id)
        .offset(page.offset())
        .limit(page.limit())
}

async fn delete_employee(txn: &DatabaseTransaction, id: EmployeeId) -> AppResult<()> {
    employee_benefit::Entity::delete_many()
        .filter(employee_benefit::Column::EmployeeId.eq(id))
        .exec(txn)
        .await?;

    let result = employee::Entity::delete_by_id(id).exec(txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn list(&self, filter: &EmployeeFilter, page: PageRequest) -> AppResult<Vec<Employee>> {
        let models = list_query(filter, page).all(&self.db).await?;

        let ids: Vec<EmployeeId> = models.iter().map(|m| m.id).collect();
        let mut enrollments = load_enrollments(&self.db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let benefits = enrollments.remove(&m.id).unwrap_or_default();
                m.into_domain(benefits)
            })
            .collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        match employee::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => attach_one(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, employee: NewEmployee) -> AppResult<Employee> {
        let txn = self.begin().await?;
        let result = insert_employee(&txn, employee).await;
        finish(txn, result).await
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        let model = employee::Entity::find_by_id(employee.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: employee::ActiveModel = model.into();
        active.address1 = Set(employee.address1.clone());
        active.address2 = Set(employee.address2.clone());
        active.city = Set(employee.city.clone());
        active.state = Set(employee.state.clone());
        active.zip_code = Set(employee.zip_code.clone());
        active.phone_number = Set(employee.phone_number.clone());
        active.email = Set(employee.email.clone());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(|e| match e {
            // deleted since it was read
            DbErr::RecordNotUpdated => AppError::NotFound,
            e => AppError::from(e),
        })?;
        attach_one(&self.db, model).await
    }

    async fn delete(&self, id: EmployeeId) -> AppResult<()> {
        let txn = self.begin().await?;
        let result = delete_employee(&txn, id).await;
        finish(txn, result).await
    }

    async fn benefits_for(&self, id: EmployeeId) -> AppResult<Option<Vec<EmployeeBenefit>>> {
        let exists = employee::Entity::find_by_id(id).one(&self.db).await?.is_some();
        if !exists {
            return Ok(None);
        }

        let benefits = load_enrollments(&self.db, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(benefits))
    }

    async fn enroll(
        &self,
        employee_id: EmployeeId,
        enrollment: NewEnrollment,
    ) -> AppResult<EmployeeBenefit> {
        let model = employee_benefit::ActiveModel {
            id: NotSet,
            employee_id: Set(employee_id),
            benefit_id: Set(enrollment.benefit_id),
            cost_override: Set(enrollment.cost_override),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // employee removed after validation
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::NotFound,
            _ => AppError::from_write(e, ENROLLMENT_ENTITY),
        })?;

        let benefit = benefit::Entity::find_by_id(model.benefit_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::internal(format!("benefit {} vanished", model.benefit_id)))?;

        Ok(EmployeeBenefit {
            id: model.id,
            employee_id: model.employee_id,
            benefit: Arc::new(Benefit::from(benefit)),
            cost_override: model.cost_override,
        })
    }
}
