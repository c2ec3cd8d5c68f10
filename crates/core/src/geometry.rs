//! Zone footprint validation.
//!
//! A zone is a quadrilateral described by four corners in image (pixel)
//! space. The only rejected shape is one where two corners coincide; convexity,
//! self-intersection and winding order are not checked.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of corners every zone footprint has.
pub const ZONE_POINT_COUNT: usize = 4;

/// A corner in image space. Both components are non-negative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Why a set of zone corners was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("wrong count: a zone needs exactly {ZONE_POINT_COUNT} points, got {0}")]
    WrongCount(usize),

    #[error("degenerate: points {first} and {second} share pixel ({}, {})", .point.x, .point.y)]
    Degenerate {
        first: usize,
        second: usize,
        point: PixelPoint,
    },
}

impl GeometryError {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            GeometryError::WrongCount(_) => "wrong count",
            GeometryError::Degenerate { .. } => "degenerate",
        }
    }
}

impl From<GeometryError> for CoreError {
    fn from(err: GeometryError) -> Self {
        CoreError::Validation(format!("invalid zone geometry: {err}"))
    }
}

/// Validate that `points` form a non-degenerate zone quadrilateral.
///
/// Every unordered pair is compared on pixel coordinates; the first
/// coincident pair found is reported.
pub fn validate_zone_points(points: &[PixelPoint]) -> Result<(), GeometryError> {
    if points.len() != ZONE_POINT_COUNT {
        return Err(GeometryError::WrongCount(points.len()));
    }

    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            if a == b {
                return Err(GeometryError::Degenerate {
                    first: i,
                    second: j,
                    point: *a,
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
