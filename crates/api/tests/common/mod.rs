#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use parktrack_api::config::ServerConfig;
use parktrack_api::router::build_app_router;
use parktrack_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
    }
}

/// Build the application router with a fresh state (and a fresh camera
/// rotation cursor) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

/// Build the router over an existing state, so several requests share one
/// rotation cursor.
pub fn build_test_app_with_state(state: AppState) -> Router {
    build_app_router(state)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn camera_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "latitude": 10.0,
        "longitude": 20.0,
        "source": "rtsp://x",
        "image_width": 640,
        "image_height": 480,
        "calib": null
    })
}

pub fn zone_body(camera_id: i64) -> serde_json::Value {
    serde_json::json!({
        "camera_id": camera_id,
        "zone_type": "standard",
        "capacity": 10,
        "pay": 0,
        "points": [
            {"x": 0, "y": 0, "latitude": 10.0, "longitude": 20.0},
            {"x": 100, "y": 0, "latitude": 10.0, "longitude": 20.001},
            {"x": 100, "y": 50, "latitude": 10.001, "longitude": 20.001},
            {"x": 0, "y": 50, "latitude": 10.001, "longitude": 20.0}
        ]
    })
}

/// Create a camera through the API and return its id.
pub async fn create_camera(pool: &PgPool, title: &str) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/cameras", camera_body(title)).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a zone through the API and return its id.
pub async fn create_zone(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/zones", body).await;
    body_json(response).await["id"].as_i64().unwrap()
}
