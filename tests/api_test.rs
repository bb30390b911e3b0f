//! API integration tests
//!
//! Drive the full router over the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use employee_api::api::{create_router, AppState};
use employee_api::config::Config;
use employee_api::infra::{seed, InMemoryStore};

async fn app() -> Router {
    let store = InMemoryStore::new();
    seed(&store).await.unwrap();
    create_router(AppState::from_config(Arc::new(store), &Config::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, json)
}

#[tokio::test]
async fn test_health() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_get_employee_hides_ssn() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/employees/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "John");
    assert_eq!(body["address1"], "123 Main St");
    assert!(body.get("social_security_number").is_none());
    assert_eq!(body["benefits"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_missing_employee() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/employees/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_with_filter_and_paging() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/employees?page=2&page_size=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Jane"]);

    let (_, _, body) = send(&app, Method::GET, "/employees?last_name_contains=doe", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["last_name"], "Doe");
}

#[tokio::test]
async fn test_create_employee() {
    let app = app().await;

    let (status, location, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "social_security_number": "222-33-4444",
            "address1": "12 St James Sq",
            "benefits": [{ "benefit_id": 1, "cost_override": "80.00" }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/employees/3"));
    assert_eq!(body["id"], 3);
    assert_eq!(body["benefits"][0]["name"], "Health");
}

#[tokio::test]
async fn test_create_with_blank_names() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "first_name": "", "social_security_number": "1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let errors = body["error"]["errors"].as_object().unwrap();
    assert!(errors.contains_key("FirstName"));
    assert!(errors.contains_key("LastName"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "first_name": 12 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_path_and_query_use_error_body() {
    let app = app().await;

    for uri in ["/employees/abc", "/employees/abc/benefits", "/employees?page=x"] {
        let (status, _, body) = send(&app, Method::GET, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "BAD_REQUEST", "{}", uri);
        assert!(body["error"]["message"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_huge_page_is_empty() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/employees?page=9223372036854775807",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_address() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/employees/1",
        Some(json!({ "address1": "123 Main Smoot" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address1"], "123 Main Smoot");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/employees/1",
        Some(json!({ "address1": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["errors"],
        json!({ "Address1": ["must not be empty"] })
    );
}

#[tokio::test]
async fn test_update_missing_employee() {
    let app = app().await;

    let (status, _, _) = send(
        &app,
        Method::PUT,
        "/employees/99",
        Some(json!({ "address1": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_benefits_not_found() {
    let app = app().await;

    let (status, _, _) = send(&app, Method::DELETE, "/employees/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, "/employees/2/benefits", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enroll_and_conflict() {
    let app = app().await;
    let enrollment = json!({ "benefit_id": 3 });

    let (status, location, body) =
        send(&app, Method::POST, "/employees/1/benefits", Some(enrollment.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/employees/1/benefits"));
    assert_eq!(body["name"], "Vision");

    let (status, _, body) =
        send(&app, Method::POST, "/employees/1/benefits", Some(enrollment)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (_, _, body) = send(&app, Method::GET, "/employees/1/benefits", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_benefits() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/benefits", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["name"], "Health");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/employees/{id}"].is_object());
    assert_eq!(
        body["components"]["schemas"]["CreateEmployeeRequest"]["properties"]["first_name"]["example"],
        "John"
    );
}
