//! Route definitions for the `/cameras` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::camera;
use crate::state::AppState;

/// Routes mounted at `/cameras`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /next      -> next
/// GET    /{id}      -> get_by_id
/// PATCH  /{id}      -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(camera::list).post(camera::create))
        .route("/next", get(camera::next))
        .route("/{id}", get(camera::get_by_id).patch(camera::update))
}
