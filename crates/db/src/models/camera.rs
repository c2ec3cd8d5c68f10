//! Camera entity model and DTOs.

use parktrack_core::geo::BoundingBox;
use parktrack_core::types::{DbId, Timestamp};
use parktrack_core::zone::MAX_CAMERA_TITLE_LEN;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::deserialize_some;

/// A camera row from the `cameras` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Camera {
    pub id: DbId,
    pub title: String,
    pub is_active: bool,
    /// Where frames are pulled from, e.g. an RTSP URL.
    pub source: String,
    pub image_width: i32,
    pub image_height: i32,
    /// Opaque calibration payload supplied by the labelling tool.
    pub calib: Option<serde_json::Value>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new camera.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCamera {
    #[validate(length(min = 1, max = MAX_CAMERA_TITLE_LEN))]
    pub title: String,
    /// Defaults to `false` if omitted.
    #[serde(default)]
    pub is_active: bool,
    #[validate(length(min = 1))]
    pub source: String,
    #[validate(range(min = 1))]
    pub image_width: i32,
    #[validate(range(min = 1))]
    pub image_height: i32,
    pub calib: Option<serde_json::Value>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// DTO for patching a camera. All fields are optional; unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCamera {
    #[validate(length(min = 1, max = MAX_CAMERA_TITLE_LEN))]
    pub title: Option<String>,
    pub is_active: Option<bool>,
    #[validate(length(min = 1))]
    pub source: Option<String>,
    #[validate(range(min = 1))]
    pub image_width: Option<i32>,
    #[validate(range(min = 1))]
    pub image_height: Option<i32>,
    /// `None` leaves the payload alone, `Some(None)` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub calib: Option<Option<serde_json::Value>>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Optional predicates for camera listings, AND-combined.
#[derive(Debug, Clone, Default)]
pub struct CameraFilter {
    /// Case-insensitive substring of the title.
    pub text_query: Option<String>,
    pub bbox: Option<BoundingBox>,
}
