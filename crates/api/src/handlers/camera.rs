//! Handlers for the `/cameras` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parktrack_core::error::CoreError;
use parktrack_core::geo::BoundingBox;
use parktrack_core::types::DbId;
use parktrack_db::models::camera::{Camera, CameraFilter, CreateCamera, UpdateCamera};
use parktrack_db::repositories::CameraRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::validated_json::ValidatedJson;
use crate::response::CreatedResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters for camera listing. The four bbox values go together.
#[derive(Debug, Deserialize)]
pub struct CameraListParams {
    /// Case-insensitive title substring.
    pub q: Option<String>,
    pub top_left_lat: Option<f64>,
    pub top_left_lon: Option<f64>,
    pub bottom_right_lat: Option<f64>,
    pub bottom_right_lon: Option<f64>,
}

impl CameraListParams {
    fn into_filter(self) -> Result<CameraFilter, CoreError> {
        let bbox = BoundingBox::from_parts(
            self.top_left_lat,
            self.top_left_lon,
            self.bottom_right_lat,
            self.bottom_right_lon,
        )?;
        Ok(CameraFilter {
            text_query: self.q,
            bbox,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/cameras
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCamera>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let camera = CameraRepo::create(&state.pool, &input).await?;
    state.selector.invalidate_count().await;

    tracing::info!(camera_id = camera.id, title = %camera.title, "Camera created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(camera.id, "Camera")),
    ))
}

/// GET /api/v1/cameras
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CameraListParams>,
) -> AppResult<Json<Vec<Camera>>> {
    let filter = params.into_filter()?;
    let cameras = CameraRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = cameras.len(), "Listed cameras");
    Ok(Json(cameras))
}

/// GET /api/v1/cameras/next
///
/// Serves the camera at the rotation cursor, or `{}` when that id is a gap.
pub async fn next(State(state): State<AppState>) -> AppResult<Response> {
    let camera = state.selector.next_camera(&state.pool).await?;
    Ok(match camera {
        Some(camera) => Json(camera).into_response(),
        None => Json(serde_json::json!({})).into_response(),
    })
}

/// GET /api/v1/cameras/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Camera>> {
    let camera = CameraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Camera",
            id,
        }))?;
    Ok(Json(camera))
}

/// PATCH /api/v1/cameras/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCamera>,
) -> AppResult<Json<Camera>> {
    let camera = CameraRepo::update(&state.pool, id, &input).await?;
    tracing::info!(camera_id = id, "Camera updated");
    Ok(Json(camera))
}
