//! Handlers for the `/zones` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parktrack_core::error::CoreError;
use parktrack_core::geometry;
use parktrack_core::types::DbId;
use parktrack_db::models::zone::{CreateZone, UpdateZone, ZoneDetail, ZoneFilter};
use parktrack_db::repositories::ZoneRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::validated_json::ValidatedJson;
use crate::response::CreatedResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters for zone listing.
#[derive(Debug, Deserialize)]
pub struct ZoneListParams {
    pub camera_id: Option<DbId>,
    pub min_free_count: Option<i32>,
    pub max_pay: Option<i32>,
}

/// Options for fetching a single zone.
#[derive(Debug, Deserialize)]
pub struct ZoneGetParams {
    /// Attach the corner points (default: `true`).
    #[serde(default = "default_with_points")]
    pub with_points: bool,
}

fn default_with_points() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/zones
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateZone>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    geometry::validate_zone_points(&input.pixel_points()).map_err(CoreError::from)?;

    let zone = ZoneRepo::create(&state.pool, &input).await?;
    tracing::info!(
        zone_id = zone.zone.id,
        camera_id = zone.zone.camera_id,
        capacity = zone.zone.capacity,
        "Zone created"
    );
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(zone.zone.id, "Zone")),
    ))
}

/// GET /api/v1/zones
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ZoneListParams>,
) -> AppResult<Json<Vec<ZoneDetail>>> {
    let filter = ZoneFilter {
        camera_id: params.camera_id,
        min_free_count: params.min_free_count,
        max_pay: params.max_pay,
    };
    let zones = ZoneRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = zones.len(), "Listed zones");
    Ok(Json(
        zones
            .into_iter()
            .map(|zone| ZoneDetail::new(zone, None))
            .collect(),
    ))
}

/// GET /api/v1/zones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ZoneGetParams>,
) -> AppResult<Json<ZoneDetail>> {
    let zone = ZoneRepo::get(&state.pool, id, params.with_points)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Zone", id }))?;
    Ok(Json(zone))
}

/// PATCH /api/v1/zones/{id}
///
/// A body containing `occupied` is an occupancy report and stamps
/// `occupancy_updated_at` instead of `updated_at`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateZone>,
) -> AppResult<Json<ZoneDetail>> {
    let zone = ZoneRepo::update(&state.pool, id, &input).await?;
    tracing::info!(
        zone_id = id,
        occupancy = input.touches_occupancy(),
        "Zone updated"
    );
    Ok(Json(zone))
}
