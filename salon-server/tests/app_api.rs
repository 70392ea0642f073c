//! Health, static files and fallback

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

use salon_server::Config;

#[tokio::test]
async fn health_reports_database_status() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn serves_static_files_and_json_404() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Salon</h1>").unwrap();

    let mut config = Config::for_tests();
    config.static_dir = dir.path().to_string_lossy().into_owned();
    let app = TestApp::with_config(config).await;

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        common::empty_request(http::Method::GET, "/index.html"),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Salon</h1>");

    let (status, body) = app.get("/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Route not found" }));
}

#[tokio::test]
async fn echoes_request_id() {
    let app = TestApp::new().await;
    let request = http::Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn unsupported_method_returns_json_405() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(common::empty_request(http::Method::PATCH, "/api/bookings"))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "message": "Method not allowed" }));

    let (status, body) = app
        .send(common::empty_request(http::Method::POST, "/api/products/category/hair"))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "Method not allowed");
}
