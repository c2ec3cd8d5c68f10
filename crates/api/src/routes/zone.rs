//! Route definitions for the `/zones` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::zone;
use crate::state::AppState;

/// Routes mounted at `/zones`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PATCH  /{id}      -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(zone::list).post(zone::create))
        .route("/{id}", get(zone::get_by_id).patch(zone::update))
}
