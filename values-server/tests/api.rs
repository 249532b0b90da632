//! Router tests against the fallback store (no database configured)

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use values_server::Container;

fn app() -> Router {
    Container::default().router()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_returns_demo_rows_with_capitalized_fields() {
    let app = app();
    let (status, body) = send(&app, get("/api/values")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["ID"], 1);
    assert_eq!(rows[0]["Name"], "Demo Item 1");
    assert_eq!(rows[0]["Value"], "Demo Value 1");
    assert!(rows[0].get("id").is_none());
}

#[tokio::test]
async fn create_then_list_includes_record() {
    let app = app();
    let (status, body) = send(
        &app,
        with_json("POST", "/api/values", json!({"name": "a", "value": "b"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Value created successfully");
    let id = body["ID"].as_i64().expect("numeric ID");

    let (_, list) = send(&app, get("/api/values")).await;
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|row| row["ID"] == id && row["Name"] == "a" && row["Value"] == "b"));
}

#[tokio::test]
async fn create_requires_name_and_value() {
    let app = app();

    let (status, body) = send(&app, with_json("POST", "/api/values", json!({"name": "a"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and Value are required");

    let (status, body) = send(
        &app,
        with_json("POST", "/api/values", json!({"name": "  ", "value": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/api/values",
            json!({"name": "n".repeat(101), "value": "b"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/values")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_existing_then_missing() {
    let app = app();

    let (status, body) = send(&app, delete("/api/values/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Value deleted successfully");

    let (status, body) = send(&app, get("/api/values/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, delete("/api/values/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_unknown_id_is_failure_shaped() {
    let app = app();
    let (status, body) = send(&app, delete("/api/values/424242")).await;

    assert_ne!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_non_numeric_id_is_400() {
    let app = app();
    let (status, body) = send(&app, delete("/api/values/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Valid ID is required");
}

#[tokio::test]
async fn update_and_get() {
    let app = app();

    let (status, body) = send(
        &app,
        with_json("PUT", "/api/values/1", json!({"name": "renamed", "value": "v"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ID"], 1);
    assert_eq!(body["Name"], "renamed");

    let (status, body) = send(&app, get("/api/values/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Name"], "renamed");

    let (status, _) = send(
        &app,
        with_json("PUT", "/api/values/77", json!({"name": "x", "value": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_demo_mode() {
    let app = app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["mode"], "demo");
    assert_eq!(body["tableReady"], false);
    assert_eq!(body["database"], "Not connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn root_banner() {
    let app = app();
    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"], json!(["/api/values", "/api/health"]));
}

#[tokio::test]
async fn list_is_stable_without_writes() {
    let app = app();
    let (_, first) = send(&app, get("/api/values")).await;
    let (_, second) = send(&app, get("/api/values")).await;
    assert_eq!(first, second);
}
