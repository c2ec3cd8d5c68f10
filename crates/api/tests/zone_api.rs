//! HTTP-level integration tests for the zone endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_camera, create_zone, get, patch_json, post_json, zone_body};
use sqlx::PgPool;

async fn zone_count(pool: &PgPool) -> (i64, i64) {
    let zones: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM zones")
        .fetch_one(pool)
        .await
        .unwrap();
    let points: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM zone_points")
        .fetch_one(pool)
        .await
        .unwrap();
    (zones, points)
}

// ---------------------------------------------------------------------------
// Create / fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lot_a_scenario(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    assert_eq!(camera_id, 1);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/zones",
        zone_body(camera_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["message"], "Zone created");

    let response = get(common::build_test_app(pool), "/api/v1/zones/1?with_points=true").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["capacity"], 10);
    assert!(json["occupied"].is_null());
    assert!(json["free_count"].is_null());
    assert_eq!(json["zone_type"], "standard");
    assert_eq!(json["pay"], 0);

    let points = json["points"].as_array().unwrap();
    let pixels: Vec<_> = points
        .iter()
        .map(|p| (p["x"].as_i64().unwrap(), p["y"].as_i64().unwrap()))
        .collect();
    assert_eq!(pixels, vec![(0, 0), (100, 0), (100, 50), (0, 50)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_zone_without_points(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let zone_id = create_zone(&pool, zone_body(camera_id)).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/zones/{zone_id}?with_points=false"),
    )
    .await;
    let json = body_json(response).await;
    assert!(json.get("points").is_none());

    // Points are attached by default.
    let response = get(common::build_test_app(pool), &format!("/api/v1/zones/{zone_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["points"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_zone_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/zones/9").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zone_for_missing_camera_returns_404_and_writes_nothing(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/zones",
        zone_body(42),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(zone_count(&pool).await, (0, 0));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn degenerate_points_rejected(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let mut body = zone_body(camera_id);
    body["points"][2]["x"] = serde_json::json!(0);
    body["points"][2]["y"] = serde_json::json!(0);

    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("degenerate"));
    assert_eq!(zone_count(&pool).await, (0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_point_count_rejected(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let mut body = zone_body(camera_id);
    body["points"].as_array_mut().unwrap().pop();

    let response = post_json(common::build_test_app(pool), "/api/v1/zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("wrong count"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_zone_type_and_capacity_rejected(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;

    let mut body = zone_body(camera_id);
    body["zone_type"] = serde_json::json!("diagonal");
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = zone_body(camera_id);
    body["capacity"] = serde_json::json!(0);
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = zone_body(camera_id);
    body["points"][0]["latitude"] = serde_json::json!(-95.0);
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/zones", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(zone_count(&pool).await, (0, 0));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn occupancy_patch_stamps_occupancy_timestamp(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let zone_id = create_zone(&pool, zone_body(camera_id)).await;

    let before = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/zones/{zone_id}")).await,
    )
    .await;
    assert!(before["occupancy_updated_at"].is_null());

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/v1/zones/{zone_id}"),
        serde_json::json!({"occupied": 4, "confidence": 0.87}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["occupied"], 4);
    assert_eq!(json["free_count"], 6);
    assert!(json["occupancy_updated_at"].is_string());
    assert_eq!(json["updated_at"], before["updated_at"]);
    assert_eq!(json["points"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn metadata_patch_advances_updated_at(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let zone_id = create_zone(&pool, zone_body(camera_id)).await;

    let before = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/zones/{zone_id}")).await,
    )
    .await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/v1/zones/{zone_id}"),
        serde_json::json!({"pay": 200, "zone_type": "parallel"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["pay"], 200);
    assert_eq!(json["zone_type"], "parallel");
    assert_ne!(json["updated_at"], before["updated_at"]);
    assert!(json["occupancy_updated_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_missing_zone_returns_404(pool: PgPool) {
    let response = patch_json(
        common::build_test_app(pool),
        "/api/v1/zones/77",
        serde_json::json!({"occupied": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_rejects_unknown_keys_and_bad_values(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let zone_id = create_zone(&pool, zone_body(camera_id)).await;
    let uri = format!("/api/v1/zones/{zone_id}");

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({"camera_id": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({"confidence": 1.5}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_min_free_count_excludes_unknown_occupancy(pool: PgPool) {
    let camera_id = create_camera(&pool, "Lot A").await;
    let unknown = create_zone(&pool, zone_body(camera_id)).await;
    let roomy = create_zone(&pool, zone_body(camera_id)).await;
    let full = create_zone(&pool, zone_body(camera_id)).await;

    for (id, occupied) in [(roomy, 1), (full, 9)] {
        patch_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/zones/{id}"),
            serde_json::json!({"occupied": occupied}),
        )
        .await;
    }

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/zones?min_free_count=5",
    )
    .await;
    let json = body_json(response).await;
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![roomy]);
    assert!(!ids.contains(&unknown));

    let response = get(common::build_test_app(pool), "/api/v1/zones").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert!(json[0].get("points").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_camera_and_max_pay(pool: PgPool) {
    let cam_a = create_camera(&pool, "Lot A").await;
    let cam_b = create_camera(&pool, "Lot B").await;
    create_zone(&pool, zone_body(cam_a)).await;
    let mut paid = zone_body(cam_a);
    paid["pay"] = serde_json::json!(300);
    create_zone(&pool, paid).await;
    create_zone(&pool, zone_body(cam_b)).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/zones?camera_id={cam_a}"),
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/zones?camera_id={cam_a}&max_pay=100"),
    )
    .await;
    let json = body_json(response).await;
    let zones = json.as_array().unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0]["pay"], 0);
}
