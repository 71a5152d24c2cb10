//! End-to-end API tests
//!
//! The remote table service points at an unreachable address, so the
//! connectivity probe fails and every call lands on the local fallback
//! store - the same degraded mode a device sees offline.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_ledger::models::Driver;
use fleet_ledger::{
    api, Config, FallbackStore, LedgerStore, LocalStore, RemoteTableStore, ServerState,
};

fn test_app(dir: &tempfile::TempDir) -> Router {
    let local = LocalStore::open(dir.path().join("ledger.redb")).unwrap();
    // TCP port 9 (discard) is never listening; probes fail fast
    let remote =
        RemoteTableStore::new("http://127.0.0.1:9".into(), String::new(), 1000, 200).unwrap();
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    config.fleet_name = "Test Fleet".into();

    let state = ServerState::new(config, Arc::new(FallbackStore::new(remote, local)));
    api::build_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Amounts serialize as JSON strings; read them back as Decimal
fn dec(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a decimal field: {other:?}"),
    }
}

#[tokio::test]
async fn health_is_public() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn driver_crud_has_upsert_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, created) = send(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({"name": "Ravi", "vehicle": "KA-01-1234", "pin": "4321"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    // Edit through full replace; the collection must not grow
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/drivers/{id}"),
        Some(json!({"name": "Ravi K", "vehicle": "KA-01-1234", "pin": "4321"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, drivers) = send(&app, "GET", "/api/drivers", None).await;
    let drivers = drivers.as_array().unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0]["name"], "Ravi K");

    let (_, deleted) = send(&app, "DELETE", &format!("/api/drivers/{id}"), None).await;
    assert_eq!(deleted, json!(true));
    let (_, drivers) = send(&app, "GET", "/api/drivers", None).await;
    assert!(drivers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn driver_login_compares_pin() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, created) = send(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({"name": "Asha", "pin": "7777"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, profile) = send(
        &app,
        "POST",
        "/api/auth/driver-login",
        Some(json!({"driverId": id, "pin": "7777"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Asha");
    // The PIN never comes back from login
    assert!(profile.get("pin").is_none());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/driver-login",
        Some(json!({"driverId": id, "pin": "0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_password_defaults_and_can_change() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/admin-login",
        Some(json!({"password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));

    let (status, _) = send(
        &app,
        "PUT",
        "/api/settings/admin-password",
        Some(json!({"password": "fleet42"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/admin-login",
        Some(json!({"password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/admin-login",
        Some(json!({"password": "fleet42"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn report_payload(driver_id: &str, date: &str) -> Value {
    json!({
        "driverId": driver_id,
        "date": date,
        "distanceKm": "180",
        "loginTime": "08:00",
        "logoutTime": "20:00",
        "incomeLocal": "500",
        "incomeOutstation": "0",
        "incomeOther": "0",
        "expenseFuel": "100",
        "expenseMaintenance": "0",
        "expenseToll": "0",
        "expenseOther": "0",
        "driverSalary": "50",
        "note": "regular day"
    })
}

#[tokio::test]
async fn submitted_report_stores_computed_totals() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, driver) = send(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({"name": "Ravi", "pin": "1234"})),
    )
    .await;
    let driver_id = driver["id"].as_str().unwrap();

    let (status, report) = send(
        &app,
        "POST",
        "/api/reports",
        Some(report_payload(driver_id, "2026-08-14")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(dec(&report["totalIncome"]), Decimal::from(500));
    assert_eq!(dec(&report["totalExpenses"]), Decimal::from(150));
    assert_eq!(dec(&report["netProfit"]), Decimal::from(350));
    // Driver name is denormalized from the profile
    assert_eq!(report["driverName"], "Ravi");
}

#[tokio::test]
async fn edited_report_recomputes_totals() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, report) = send(
        &app,
        "POST",
        "/api/reports",
        Some(report_payload("d-1", "2026-08-14")),
    )
    .await;
    let id = report["id"].as_str().unwrap();

    let mut edited = report_payload("d-1", "2026-08-14");
    edited["incomeOutstation"] = json!("1,200.50 km trip");
    let (status, updated) = send(&app, "PUT", &format!("/api/reports/{id}"), Some(edited)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(dec(&updated["totalIncome"]), "1700.50".parse().unwrap());
    assert_eq!(
        dec(&updated["netProfit"]),
        dec(&updated["totalIncome"]) - dec(&updated["totalExpenses"])
    );

    // Full replace, not a second record
    let (_, all) = send(&app, "GET", "/api/reports", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn custom_range_filters_reports() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    for date in ["2026-08-01", "2026-08-15", "2026-09-01"] {
        send(&app, "POST", "/api/reports", Some(report_payload("d-1", date))).await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/reports?range=custom&startDate=2026-08-01&endDate=2026-08-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reports = body.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    // Newest first
    assert_eq!(reports[0]["date"], "2026-08-15");
    assert_eq!(reports[1]["date"], "2026-08-01");
}

#[tokio::test]
async fn summary_aggregates_filtered_reports() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    send(
        &app,
        "POST",
        "/api/reports",
        Some(report_payload("d-1", "2026-08-14")),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/reports",
        Some(report_payload("d-2", "2026-08-15")),
    )
    .await;

    let (status, summary) = send(&app, "GET", "/api/statistics/summary?range=all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["reportCount"], json!(2));
    assert_eq!(dec(&summary["totalIncome"]), Decimal::from(1000));
    assert_eq!(dec(&summary["netProfit"]), Decimal::from(700));

    // Narrow to one driver
    let (_, summary) = send(
        &app,
        "GET",
        "/api/statistics/summary?range=all&driver=d-1",
        None,
    )
    .await;
    assert_eq!(summary["reportCount"], json!(1));
    assert_eq!(dec(&summary["netProfit"]), Decimal::from(350));
}

/// Table service that answers the connectivity probe but fails every row
/// operation, the shape of a half-broken backend.
async fn spawn_failing_table_service() -> String {
    let app = Router::new()
        .route("/health", axum::routing::get(|| async { StatusCode::OK }))
        .fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn remote_failure_after_probe_downgrades_to_local() {
    let base_url = spawn_failing_table_service().await;
    let dir = tempfile::tempdir().unwrap();
    let local = LocalStore::open(dir.path().join("ledger.redb")).unwrap();
    let remote = RemoteTableStore::new(base_url, String::new(), 1000, 500).unwrap();
    let store = FallbackStore::new(remote, local);

    let driver = Driver {
        id: "d-1".into(),
        name: "Ravi".into(),
        vehicle: "KA-01".into(),
        pin: "1234".into(),
    };

    // Probe passes, the PUT fails, the write must land locally
    store.upsert_driver(driver.clone()).await.unwrap();
    store
        .upsert_driver(Driver {
            name: "Ravi K".into(),
            ..driver
        })
        .await
        .unwrap();

    // Reads downgrade the same way and see the local data
    let drivers = store.list_drivers().await.unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].name, "Ravi K");

    let found = store.get_driver("d-1").await.unwrap().unwrap();
    assert_eq!(found.name, "Ravi K");

    // Settings follow the default chain when the remote keeps failing
    assert_eq!(store.admin_password().await.unwrap(), "admin");
}

#[tokio::test]
async fn missing_report_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = send(&app, "GET", "/api/reports/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}
