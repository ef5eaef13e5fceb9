//! HTTP integration tests for the report endpoints

mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use support::{body_json, body_text, date, TestApp};
use uuid::Uuid;

async fn seed_office(app: &TestApp) -> Uuid {
    let role = app.seed_role("Account Rep").await;
    let expectation = json!({
        "roleId": role.id,
        "appsGoalsByLob": [
            { "lob_id": "Auto", "apps": 10 },
            { "lob_id": "Life", "apps": 5 }
        ],
        "premiumByBucket": { "PC": 20000.0, "FS": 8000.0 }
    });
    let response = app
        .request(Method::PUT, "/api/targets/roles", app.admin, "admin", Some(expectation))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let alice = app.seed_person("Alice Brook", Some(role.id)).await;
    app.seed_sale(alice.id, "Auto", 1200.0, date(2024, 1, 10)).await;
    app.seed_sale(alice.id, "Life", 800.0, date(2024, 1, 12)).await;
    alice.id
}

#[tokio::test(flavor = "multi_thread")]
async fn benchmark_report_reflects_seeded_sales() {
    let app = TestApp::new();
    seed_office(&app).await;

    let response = app
        .get(
            "/api/reports/benchmark?start=2024-01-01&end=2024-01-31&asOf=2024-01-16",
            app.admin,
            "admin",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["office"]["appsActual"], 2.0);
    assert_eq!(report["office"]["premiumActual"], 2000.0);
    assert_eq!(report["office"]["appsTarget"], 15.0);
    assert_eq!(report["office"]["premiumTarget"], 28000.0);
    assert_eq!(report["people"][0]["expectationSource"], "ROLE");

    let rows = report["breakdown"]["rows"].as_array().expect("breakdown rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["key"], "PC");
    assert_eq!(rows[0]["premiumActual"], 1200.0);
    assert_eq!(rows[1]["key"], "FS");
    assert_eq!(rows[1]["premiumActual"], 800.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn csv_export_carries_attachment_headers() {
    let app = TestApp::new();
    seed_office(&app).await;

    let response = app
        .get(
            "/api/reports/benchmark.csv?start=2024-01-01&end=2024-01-31&asOf=2024-01-16",
            app.admin,
            "admin",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .expect("content disposition present")
        .to_string();
    assert!(disposition.contains("benchmarks_2024-01-01_to_2024-01-31.csv"));

    let body = body_text(response).await;
    assert!(body.starts_with("OFFICE"));
    assert!(body.contains("BREAKDOWN"));
    assert!(body.contains("Alice Brook"));
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshots_round_trip_verbatim() {
    let app = TestApp::new();
    seed_office(&app).await;

    let request = json!({
        "start": "2024-01-01",
        "end": "2024-01-31",
        "asOf": "2024-01-16",
        "title": "January benchmarks"
    });
    let response = app
        .request(Method::POST, "/api/reports/snapshots", app.admin, "admin", Some(request))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    let id = saved["id"].as_str().expect("snapshot id").to_string();
    assert_eq!(saved["statusesCsv"], "submitted,issued,paid");

    let response = app
        .get(&format!("/api/reports/snapshots/{id}"), app.admin, "admin")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["payload"], saved["payload"]);
    assert_eq!(fetched["title"], "January benchmarks");

    let response = app.get("/api/reports/snapshots", app.admin, "admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_snapshot_is_not_found() {
    let app = TestApp::new();
    let response = app
        .get(&format!("/api/reports/snapshots/{}", Uuid::new_v4()), app.admin, "admin")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn person_roi_requires_known_person() {
    let app = TestApp::new();
    let response = app
        .get(
            &format!("/api/people/{}/roi?monthsBack=3&asOf=2024-04-01", Uuid::new_v4()),
            app.admin,
            "admin",
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn person_roi_returns_descending_months() {
    let app = TestApp::new();
    let person = seed_office(&app).await;

    let response = app
        .get(
            &format!("/api/people/{person}/roi?monthsBack=3&asOf=2024-04-01"),
            app.admin,
            "admin",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    let months = report["months"].as_array().expect("months");
    assert_eq!(months.len(), 3);
    assert!(months[0]["month"].as_str() > months[1]["month"].as_str());
}

#[tokio::test(flavor = "multi_thread")]
async fn plain_members_cannot_view_reports() {
    let app = TestApp::new();
    let response = app
        .get(
            "/api/reports/benchmark?start=2024-01-01&end=2024-01-31",
            Uuid::new_v4(),
            "member",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_identity_headers_are_unauthorized() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/reports/benchmark?start=2024-01-01&end=2024-01-31")
        .body(axum::body::Body::empty())
        .expect("build request");
    let response =
        tower::ServiceExt::oneshot(app.app.clone(), request).await.expect("send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_token_is_rejected() {
    let app = TestApp::new();
    let response = app
        .get(
            "/api/reports/benchmark?start=2024-01-01&end=2024-01-31&statuses=issued,bogus",
            app.admin,
            "admin",
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
