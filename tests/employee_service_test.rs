//! Employee service integration tests
//!
//! These run the service against the in-memory store, with thin wrappers
//! to simulate a failing or slow database.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;

use employee_api::domain::{
    CreateEmployeeRequest, Employee, EmployeeBenefit, EmployeeFilter, EmployeeId, EmployeeQuery,
    EnrollBenefitRequest, NameMatch, NewEmployee, NewEnrollment, UpdateEmployeeRequest,
};
use employee_api::errors::{AppError, AppResult};
use employee_api::infra::{
    seed, BenefitRepository, EmployeeRepository, InMemoryStore, UnitOfWork,
};
use employee_api::services::{EmployeeManager, EmployeeService, ServiceSettings};
use employee_api::types::PageRequest;
use employee_api::validation::ViolationKind;

async fn seeded() -> (InMemoryStore, EmployeeManager<InMemoryStore>) {
    let store = InMemoryStore::new();
    seed(&store).await.unwrap();
    let service = EmployeeManager::new(Arc::new(store.clone()), ServiceSettings::default());
    (store, service)
}

fn create_request(first: &str, last: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        first_name: first.to_string(),
        last_name: last.to_string(),
        social_security_number: "111-22-3333".to_string(),
        address1: Some("1 Test Way".to_string()),
        ..Default::default()
    }
}

fn address_update(address1: &str) -> UpdateEmployeeRequest {
    UpdateEmployeeRequest {
        address1: Some(address1.to_string()),
        ..Default::default()
    }
}

fn first_names(employees: &[Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.first_name.as_str()).collect()
}

/// Delegates to the in-memory store, optionally failing updates or stalling reads
struct FlakyEmployees {
    inner: InMemoryStore,
    fail_updates: bool,
    read_delay: Option<Duration>,
}

#[async_trait]
impl EmployeeRepository for FlakyEmployees {
    async fn list(&self, filter: &EmployeeFilter, page: PageRequest) -> AppResult<Vec<Employee>> {
        EmployeeRepository::list(&self.inner, filter, page).await
    }

    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.find_by_id(id).await
    }

    async fn create(&self, employee: NewEmployee) -> AppResult<Employee> {
        EmployeeRepository::create(&self.inner, employee).await
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        if self.fail_updates {
            return Err(AppError::Database(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection reset".to_string(),
            ))));
        }
        self.inner.update(employee).await
    }

    async fn delete(&self, id: EmployeeId) -> AppResult<()> {
        self.inner.delete(id).await
    }

    async fn benefits_for(&self, id: EmployeeId) -> AppResult<Option<Vec<EmployeeBenefit>>> {
        self.inner.benefits_for(id).await
    }

    async fn enroll(
        &self,
        employee_id: EmployeeId,
        enrollment: NewEnrollment,
    ) -> AppResult<EmployeeBenefit> {
        self.inner.enroll(employee_id, enrollment).await
    }
}

struct FlakyUnitOfWork {
    store: InMemoryStore,
    employees: Arc<FlakyEmployees>,
}

impl FlakyUnitOfWork {
    async fn new(fail_updates: bool, read_delay: Option<Duration>) -> Self {
        let store = InMemoryStore::new();
        seed(&store).await.unwrap();
        let employees = Arc::new(FlakyEmployees {
            inner: store.clone(),
            fail_updates,
            read_delay,
        });
        Self { store, employees }
    }
}

#[async_trait]
impl UnitOfWork for FlakyUnitOfWork {
    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn benefits(&self) -> Arc<dyn BenefitRepository> {
        Arc::new(self.store.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_create_with_blank_names_persists_nothing() {
    let (store, service) = seeded().await;

    for (first, last, expected) in [
        ("", "Doe", vec!["FirstName"]),
        ("John", "  ", vec!["LastName"]),
        ("", "", vec!["FirstName", "LastName"]),
    ] {
        let err = service
            .create_employee(create_request(first, last))
            .await
            .unwrap_err();

        let failure = match err {
            AppError::Validation(failure) => failure,
            other => panic!("expected validation failure, got {:?}", other),
        };
        let fields: Vec<String> = failure.errors().into_keys().collect();
        assert_eq!(fields, expected);
        assert!(failure.contains(&ViolationKind::FieldRequired));
    }

    let all = EmployeeRepository::list(&store, &EmployeeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_create_with_enrollments() {
    let (_, service) = seeded().await;
    let mut request = create_request("Ada", "Lovelace");
    request.benefits = vec![
        EnrollBenefitRequest {
            benefit_id: 2,
            cost_override: None,
        },
        EnrollBenefitRequest {
            benefit_id: 3,
            cost_override: Some(Decimal::new(1250, 2)),
        },
    ];

    let created = service.create_employee(request).await.unwrap();

    let costs: Vec<_> = created.benefits.iter().map(|b| (b.benefit_id(), b.cost())).collect();
    assert_eq!(
        costs,
        vec![(2, Decimal::new(5000, 2)), (3, Decimal::new(1250, 2))]
    );
}

#[tokio::test]
async fn test_create_with_unknown_benefit_persists_nothing() {
    let (store, service) = seeded().await;
    let mut request = create_request("Ada", "Lovelace");
    request.benefits = vec![EnrollBenefitRequest {
        benefit_id: 42,
        cost_override: None,
    }];

    let err = service.create_employee(request).await.unwrap_err();

    match err {
        AppError::Validation(failure) => {
            assert!(failure.contains(&ViolationKind::UnknownBenefit(42)))
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(store.enrollment_count().await, 4);
}

#[tokio::test]
async fn test_update_missing_employee_is_not_found() {
    let (_, service) = seeded().await;

    // Address rule would fail too if it were evaluated
    let err = service
        .update_employee(99, address_update(""))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_update_keeps_address_or_fails() {
    let (_, service) = seeded().await;

    let updated = service
        .update_employee(1, address_update("123 Main Smoot"))
        .await
        .unwrap();
    assert_eq!(updated.address1.as_deref(), Some("123 Main Smoot"));

    let stored = service.get_employee(1).await.unwrap();
    assert_eq!(stored.address1.as_deref(), Some("123 Main Smoot"));
    assert_eq!(stored.first_name, "John");
    assert_eq!(stored.social_security_number, "123-45-6789");

    let err = service
        .update_employee(1, address_update(""))
        .await
        .unwrap_err();
    let failure = match err {
        AppError::Validation(failure) => failure,
        other => panic!("expected validation failure, got {:?}", other),
    };
    assert_eq!(
        failure.errors().get("Address1"),
        Some(&vec!["must not be empty".to_string()])
    );

    let stored = service.get_employee(1).await.unwrap();
    assert_eq!(stored.address1.as_deref(), Some("123 Main Smoot"));
}

#[tokio::test]
async fn test_update_may_set_first_address() {
    let (_, service) = seeded().await;
    let mut request = create_request("Grace", "Hopper");
    request.address1 = None;
    let created = service.create_employee(request).await.unwrap();

    let updated = service
        .update_employee(created.id, UpdateEmployeeRequest::default())
        .await
        .unwrap();
    assert_eq!(updated.address1, None);

    let updated = service
        .update_employee(created.id, address_update("7 Navy Yard"))
        .await
        .unwrap();
    assert_eq!(updated.address1.as_deref(), Some("7 Navy Yard"));
}

#[tokio::test]
async fn test_update_storage_error_is_not_validation() {
    let uow = Arc::new(FlakyUnitOfWork::new(true, None).await);
    let service = EmployeeManager::new(uow, ServiceSettings::default());

    let err = service
        .update_employee(1, address_update("9 Elsewhere"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert!(err.is_infrastructure());
}

#[tokio::test(start_paused = true)]
async fn test_slow_store_times_out() {
    let uow = Arc::new(FlakyUnitOfWork::new(false, Some(Duration::from_secs(30))).await);
    let settings = ServiceSettings {
        store_timeout: Duration::from_secs(1),
        ..ServiceSettings::default()
    };
    let service = EmployeeManager::new(uow, settings);

    let err = service.get_employee(1).await.unwrap_err();

    assert!(matches!(err, AppError::Timeout));
}

#[tokio::test]
async fn test_name_filter_is_idempotent() {
    let (_, service) = seeded().await;
    service
        .create_employee(create_request("Johanna", "Berg"))
        .await
        .unwrap();

    let query = EmployeeQuery {
        first_name_contains: Some("JOH".to_string()),
        ..Default::default()
    };
    let once = service.list_employees(query.clone()).await.unwrap();
    let twice = service.list_employees(query).await.unwrap();

    assert_eq!(first_names(&once), vec!["John", "Johanna"]);
    assert_eq!(first_names(&once), first_names(&twice));
}

#[tokio::test]
async fn test_case_sensitive_name_filter() {
    let store = InMemoryStore::new();
    seed(&store).await.unwrap();
    let settings = ServiceSettings {
        name_match: NameMatch::CaseSensitive,
        ..ServiceSettings::default()
    };
    let service = EmployeeManager::new(Arc::new(store), settings);

    let upper = EmployeeQuery {
        last_name_contains: Some("SMITH".to_string()),
        ..Default::default()
    };
    assert!(service.list_employees(upper).await.unwrap().is_empty());

    let exact = EmployeeQuery {
        last_name_contains: Some("Smi".to_string()),
        ..Default::default()
    };
    assert_eq!(
        first_names(&service.list_employees(exact).await.unwrap()),
        vec!["Jane"]
    );
}

#[tokio::test]
async fn test_second_page_of_one() {
    let (_, service) = seeded().await;

    let page = service
        .list_employees(EmployeeQuery {
            page: Some(2),
            page_size: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(first_names(&page), vec!["Jane"]);
}

#[tokio::test]
async fn test_non_positive_paging_is_clamped() {
    let (_, service) = seeded().await;

    let page = service
        .list_employees(EmployeeQuery {
            page: Some(0),
            page_size: Some(-5),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(first_names(&page), vec!["John"]);
}

#[tokio::test]
async fn test_delete_removes_enrollments() {
    let (store, service) = seeded().await;
    assert_eq!(store.enrollment_count().await, 4);

    service.delete_employee(1).await.unwrap();

    assert_eq!(store.enrollment_count().await, 2);
    assert!(matches!(
        service.get_benefits(1).await.unwrap_err(),
        AppError::NotFound
    ));
    assert!(matches!(
        service.delete_employee(1).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn test_enrollment_rules() {
    let (_, service) = seeded().await;

    let enrollment = service
        .enroll_benefit(
            1,
            EnrollBenefitRequest {
                benefit_id: 3,
                cost_override: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(enrollment.benefit.name, "Vision");
    assert_eq!(service.get_benefits(1).await.unwrap().len(), 3);

    let duplicate = service
        .enroll_benefit(
            1,
            EnrollBenefitRequest {
                benefit_id: 3,
                cost_override: Some(Decimal::ONE),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(duplicate, AppError::Conflict(_)));

    let unknown = service
        .enroll_benefit(
            1,
            EnrollBenefitRequest {
                benefit_id: 77,
                cost_override: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(unknown, AppError::Validation(_)));

    let missing = service
        .enroll_benefit(
            99,
            EnrollBenefitRequest {
                benefit_id: 1,
                cost_override: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound));
}

#[tokio::test]
async fn test_list_benefits() {
    let (_, service) = seeded().await;

    let names: Vec<_> = service
        .list_benefits()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();

    assert_eq!(names, vec!["Health", "Dental", "Vision"]);
}
