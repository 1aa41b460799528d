//! Router-level tests: real handlers, real services, in-memory SQLite.

use axum::body::{to_bytes, Body};
use axum::http::{HeaderValue, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::storage::DbConnection;
use crate::{create_router, AppState};

async fn test_app() -> Router {
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    create_router(
        AppState::from_connection(db),
        HeaderValue::from_static("http://localhost:8080"),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

fn two_boxes() -> Value {
    json!([
        {"date": "2024-01-01", "worker_name": "Ana", "shift": 1, "vale_amount": "100.00",
         "breakdown": {"50": 2}},
        {"date": "2024-01-01", "worker_name": "Luis", "shift": 2, "vale_amount": "50.00",
         "breakdown": {"20": "2", "5": 2}},
        {}
    ])
}

async fn save_session(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({"session_date": "2024-01-02", "auditor_name": "Marta", "cash_boxes": two_boxes()})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["session"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_list_denominations() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/denominations", None).await;

    assert_eq!(status, StatusCode::OK);
    let denominations = body["denominations"].as_array().unwrap();
    assert_eq!(denominations.len(), 15);
    assert_eq!(denominations[7], json!({"key": "2", "value": "2.00", "kind": "coin"}));
}

#[tokio::test]
async fn test_reconciliation_summary() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/reconciliation/summary",
        Some(json!({"cash_boxes": two_boxes()})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid_box_count"], 2);
    assert_eq!(body["excluded_box_count"], 1);
    assert_eq!(
        body["totals"],
        json!({"total_vales": "150.00", "total_breakdown": "150.00", "difference": "0.00", "balanced": true})
    );
    assert_eq!(body["by_date"][0]["shifts"][1]["total_breakdown"], "50.00");
    assert_eq!(body["denominations"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_reconciliation_summary_rejects_bad_box() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/reconciliation/summary",
        Some(json!({"cash_boxes": [{"date": "01/01/2024", "worker_name": "Ana"}]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("index 0"));
}

#[tokio::test]
async fn test_breakdown_total() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/breakdown/total",
        Some(json!({"breakdown": {"0.01": 3, "oops": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total": "0.03", "rejected_keys": ["oops"]}));
}

#[tokio::test]
async fn test_breakdown_total_survives_overflowing_entries() {
    let app = test_app().await;
    let huge = "79228162514264337593543950335";
    let (status, body) = send(
        &app,
        "POST",
        "/api/breakdown/total",
        Some(json!({"breakdown": {huge: 2, "50": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total": "50.00", "rejected_keys": [huge]}));
}

#[tokio::test]
async fn test_huge_vale_amounts_are_rejected() {
    let app = test_app().await;
    let huge_box = json!({"date": "2024-01-01", "worker_name": "Ana", "shift": 1,
                          "vale_amount": "79228162514264337593543950335"});

    let (status, body) = send(
        &app,
        "POST",
        "/api/reconciliation/summary",
        Some(json!({"cash_boxes": [huge_box.clone(), huge_box.clone()]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("above the maximum"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"session_date": "2024-01-02", "auditor_name": "Marta",
                    "cash_boxes": [huge_box.clone(), huge_box]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wizard_configure_with_date_and_auditor() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/wizard/transition",
        Some(json!({"state": {"step": 1}, "action": {
            "action": "configure", "box_count": 3,
            "session_date": "2024-03-01", "auditor_name": "Marta"
        }})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["cash_boxes"].as_array().unwrap().len(), 3);
    assert_eq!(body["state"]["session_date"], "2024-03-01");
    assert_eq!(body["state"]["auditor_name"], "Marta");
}

#[tokio::test]
async fn test_wizard_transition() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/wizard/transition",
        Some(json!({"state": {"step": 1}, "action": {"action": "configure", "box_count": 2}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["cash_boxes"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        "POST",
        "/api/wizard/transition",
        Some(json!({"state": body["state"], "action": {"action": "next"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], 2);
    assert_eq!(body["state"]["box_index"], 0);

    let (status, _) = send(
        &app,
        "POST",
        "/api/wizard/transition",
        Some(json!({"state": {"step": 1}, "action": {"action": "back"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = test_app().await;
    let id = save_session(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["total_cash_boxes"], 2);
    assert_eq!(body["session"]["status"], "balanced");
    assert_eq!(body["cash_boxes"][1]["breakdown"], json!({"20": 2, "5": 2}));

    let (status, body) = send(&app, "GET", "/api/sessions?limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_session_idempotency() {
    let app = test_app().await;
    let request = json!({
        "session_date": "2024-01-02",
        "auditor_name": "Marta",
        "cash_boxes": two_boxes(),
        "idempotency_key": "4f0c2a8e-1d2b-4c3a-9e7f-0a1b2c3d4e5f"
    });

    let (first_status, first) = send(&app, "POST", "/api/sessions", Some(request.clone())).await;
    let (second_status, second) = send(&app, "POST", "/api/sessions", Some(request)).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["created"], false);
    assert_eq!(first["session"]["id"], second["session"]["id"]);
}

#[tokio::test]
async fn test_save_session_validation() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"session_date": "2024-01-02", "auditor_name": " ", "cash_boxes": two_boxes()})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"session_date": "2024-01-02", "auditor_name": "Marta", "cash_boxes": [{}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reports() {
    let app = test_app().await;
    let id = save_session(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}/report?type=by_date", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Arqueo por fecha (2024-01-02)");
    assert_eq!(body["by_date"].as_array().unwrap().len(), 1);

    let (status, saved) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/reports", id),
        Some(json!({"report_type": "by_cash_box", "content": "<h1>Arqueo</h1>"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["title"], "Arqueo por bote (2024-01-02)");

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}/reports", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reports"].as_array().unwrap().len(), 1);

    let report_id = saved["id"].as_i64().unwrap();
    let (status, body) = send(&app, "GET", &format!("/api/reports/{}", report_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "<h1>Arqueo</h1>");

    let (status, _) = send(&app, "GET", "/api/reports/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_names() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/names",
        Some(json!({"name": " Ana ", "name_type": "worker"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ana");

    let (status, _) = send(
        &app,
        "POST",
        "/api/names",
        Some(json!({"name": "Ana", "name_type": "worker"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", "/api/names?type=worker", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["names"].as_array().unwrap().len(), 1);

    let id = created["id"].as_i64().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/names/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/names?type=worker", None).await;
    assert!(body["names"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", "/api/names/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_status_for_error_families() {
    use super::status_for;
    use crate::domain::models::SessionValidationError;
    use crate::domain::ServiceError;

    let validation = ServiceError::from(SessionValidationError::MissingSessionDate);
    assert_eq!(status_for(&validation), StatusCode::BAD_REQUEST);
    assert_eq!(status_for(&ServiceError::not_found("Session", 1)), StatusCode::NOT_FOUND);
    assert_eq!(
        status_for(&ServiceError::Conflict("taken".to_string())),
        StatusCode::CONFLICT
    );
    let storage: ServiceError = anyhow::anyhow!("disk full").into();
    assert_eq!(status_for(&storage), StatusCode::INTERNAL_SERVER_ERROR);
}
