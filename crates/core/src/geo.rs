//! Geographic coordinate bounds and the camera bounding-box filter.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Coordinate limits
// ---------------------------------------------------------------------------

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Validate a latitude in degrees. NaN and infinity are rejected.
pub fn validate_latitude(latitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be within [{MIN_LATITUDE}, {MAX_LATITUDE}], got {latitude}"
        )));
    }
    Ok(())
}

/// Validate a longitude in degrees. NaN and infinity are rejected.
pub fn validate_longitude(longitude: f64) -> Result<(), CoreError> {
    if !longitude.is_finite() || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be within [{MIN_LONGITUDE}, {MAX_LONGITUDE}], got {longitude}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// Rectangle used to filter camera listings, given by its top-left and
/// bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub top_left_lat: f64,
    pub top_left_lon: f64,
    pub bottom_right_lat: f64,
    pub bottom_right_lon: f64,
}

impl BoundingBox {
    /// Assemble a box from optional query parameters.
    ///
    /// Returns `Ok(None)` when no corner is given and a validation error when
    /// only some of the four values are present or any is out of range.
    pub fn from_parts(
        top_left_lat: Option<f64>,
        top_left_lon: Option<f64>,
        bottom_right_lat: Option<f64>,
        bottom_right_lon: Option<f64>,
    ) -> Result<Option<Self>, CoreError> {
        match (top_left_lat, top_left_lon, bottom_right_lat, bottom_right_lon) {
            (None, None, None, None) => Ok(None),
            (Some(tl_lat), Some(tl_lon), Some(br_lat), Some(br_lon)) => {
                validate_latitude(tl_lat)?;
                validate_latitude(br_lat)?;
                validate_longitude(tl_lon)?;
                validate_longitude(br_lon)?;
                Ok(Some(Self {
                    top_left_lat: tl_lat,
                    top_left_lon: tl_lon,
                    bottom_right_lat: br_lat,
                    bottom_right_lon: br_lon,
                }))
            }
            _ => Err(CoreError::Validation(
                "bounding box requires top_left_lat, top_left_lon, \
                 bottom_right_lat and bottom_right_lon together"
                    .to_string(),
            )),
        }
    }

    /// Whether a coordinate passes the box filter.
    ///
    /// Mirrors the SQL predicate used by the camera listing. Both longitude
    /// bounds are lower bounds: the bottom-right longitude is compared with
    /// `>=` exactly like the top-left one, so the box is open to the east.
    pub fn matches(&self, latitude: f64, longitude: f64) -> bool {
        latitude <= self.top_left_lat
            && longitude >= self.top_left_lon
            && latitude >= self.bottom_right_lat
            && longitude >= self.bottom_right_lon
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
