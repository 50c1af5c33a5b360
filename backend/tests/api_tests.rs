//! HTTP API tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against an
//! in-memory farmer store and a stubbed inference collaborator.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use nurturewise_backend::create_app;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;

const BOUNDARY: &str = "nwa-test-boundary";

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn multipart_request(token: &str, image: Option<&[u8]>, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"leaf.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/analysis")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

async fn register_and_login(app: &Router, contact: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/auth/register",
            json!({"name": "Kavya", "contact": contact, "field_size": 10.0, "crop_planted": "Tomato"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        json_request(Method::POST, "/api/v1/auth/login", json!({"contact": contact}), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_twice_returns_same_id() {
    let app = create_app(app_state(blight_and_rust()).await);
    let payload = json!({"name": "Kavya", "contact": "9811122233", "field_size": 3.0, "crop_planted": "Rice"});

    let (status, first) = send(
        &app,
        json_request(Method::POST, "/api/v1/auth/register", payload.clone(), None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["message"], "Registration successful! You can now log in.");

    let (_, second) = send(
        &app,
        json_request(Method::POST, "/api/v1/auth/register", payload, None),
    )
    .await;
    assert_eq!(first["farmer_id"], second["farmer_id"]);
}

#[tokio::test]
async fn test_register_validation_error() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/auth/register",
            json!({"name": "Kavya", "contact": "9811122233", "field_size": 0.0, "crop_planted": "Rice"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "field_size");
}

#[tokio::test]
async fn test_login_unknown_contact_is_not_found() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/auth/login", json!({"contact": "9000000000"}), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Farmer not found. Please register.");
}

#[tokio::test]
async fn test_login_unknown_text_contact_is_not_found() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/auth/login", json!({"contact": "asha@example.com"}), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_analysis_with_image() {
    let app = create_app(app_state(blight_and_rust()).await);
    let token = register_and_login(&app, "9811122233").await;

    let (status, body) = send(
        &app,
        multipart_request(
            &token,
            Some(&[0xFF, 0xD8, 0xFF, 0xE0]),
            &[("affected_area", "2"), ("crop_price", "100")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["farmer"]["name"], "Kavya");
    assert_eq!(body["detection"]["status"], "detected");
    assert_eq!(body["detection"]["label"], "Blight");
    assert_eq!(body["detection"]["confidence_percent"], "92.00%");
    assert_eq!(
        body["detection"]["links"]["fertilizer_search_url"],
        "https://www.google.com/search?q=Blight%20fertilizer%20product%20shop"
    );
    assert_eq!(body["economics"]["status"], "computed");
    assert_eq!(body["economics"]["field_size"], 10.0);
}

#[tokio::test]
async fn test_analysis_without_predictions() {
    let app = create_app(app_state(StubInference(Some(vec![]))).await);
    let token = register_and_login(&app, "9811122233").await;

    let (status, body) = send(
        &app,
        multipart_request(
            &token,
            Some(&[0x89, 0x50, 0x4E, 0x47]),
            &[("field_size", "10"), ("affected_area", "2"), ("crop_price", "100")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detection"]["status"], "no_detection");
    assert_eq!(body["detection"]["message"], "No disease detected. Please try again.");
    assert_eq!(body["economics"]["status"], "computed");
}

#[tokio::test]
async fn test_analysis_rejects_non_numeric_input() {
    let app = create_app(app_state(blight_and_rust()).await);
    let token = register_and_login(&app, "9811122233").await;

    let (status, body) = send(
        &app,
        multipart_request(&token, None, &[("affected_area", "lots")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "affected_area");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = create_app(app_state(blight_and_rust()).await);
    let token = register_and_login(&app, "9811122233").await;

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/farmers/me", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contact"], "9811122233");

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/v1/auth/logout", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        json_request(Method::GET, "/api/v1/farmers/me", Value::Null, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, multipart_request(&token, None, &[])).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/farmers/me", Value::Null, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/v1/farmers/me", Value::Null, Some("not-a-jwt")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_standalone_economics() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/economics",
            json!({"field_size": 10.0, "affected_area": 2.0, "crop_price": 100.0}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "computed");
    assert_eq!(body["currency_symbol"], "₹");

    let (_, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/v1/economics",
            json!({"field_size": 10.0, "affected_area": 0.0, "crop_price": 100.0}),
            None,
        ),
    )
    .await;
    assert_eq!(body["status"], "inputs_required");
    assert_eq!(
        body["message"],
        "Please fill in the inputs above to calculate economic impact."
    );
}

#[tokio::test]
async fn test_health() {
    let app = create_app(app_state(blight_and_rust()).await);

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
