pub mod camera;
pub mod health;
pub mod zone;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cameras                 list (?q, bbox), create
/// /cameras/next            next camera in the polling rotation
/// /cameras/{id}            get, patch
///
/// /zones                   list (?camera_id, min_free_count, max_pay), create
/// /zones/{id}              get (?with_points), patch
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cameras", camera::router())
        .nest("/zones", zone::router())
}
