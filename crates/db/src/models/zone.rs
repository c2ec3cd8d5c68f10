//! Parking zone entity model, its corner points and DTOs.

use parktrack_core::geometry::PixelPoint;
use parktrack_core::types::{DbId, Timestamp};
use parktrack_core::zone::{self, ZoneKind};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::deserialize_some;

/// A zone row from the `zones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Zone {
    pub id: DbId,
    pub camera_id: DbId,
    #[sqlx(try_from = "String")]
    pub zone_type: ZoneKind,
    /// Total number of spots.
    pub capacity: i32,
    /// Externally reported filled spots; `None` means unknown.
    pub occupied: Option<i32>,
    /// Detector confidence for the last occupancy report.
    pub confidence: Option<f64>,
    pub pay: i32,
    pub occupancy_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Zone {
    pub fn free_count(&self) -> Option<i32> {
        zone::free_count(self.capacity, self.occupied)
    }
}

/// One corner of a zone, from the `zone_points` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ZonePoint {
    pub id: DbId,
    pub zone_id: DbId,
    /// Corner order, `0..=3`.
    pub sort_order: i16,
    pub x: i32,
    pub y: i32,
    pub latitude: f64,
    pub longitude: f64,
}

/// A zone joined with its points in a single query.
#[derive(Debug, FromRow)]
pub(crate) struct ZoneWithPointsRow {
    #[sqlx(flatten)]
    pub zone: Zone,
    pub points: Json<Vec<ZonePoint>>,
}

/// API-facing zone: the row plus derived free count and optional points.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneDetail {
    #[serde(flatten)]
    pub zone: Zone,
    pub free_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<ZonePoint>>,
}

impl ZoneDetail {
    pub fn new(zone: Zone, points: Option<Vec<ZonePoint>>) -> Self {
        Self {
            free_count: zone.free_count(),
            zone,
            points,
        }
    }
}

/// DTO for one corner of a new zone.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateZonePoint {
    #[validate(range(min = 0))]
    pub x: i32,
    #[validate(range(min = 0))]
    pub y: i32,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl CreateZonePoint {
    pub fn pixel(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

/// DTO for creating a new zone with its corners.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateZone {
    pub camera_id: DbId,
    pub zone_type: ZoneKind,
    #[validate(range(min = 1))]
    pub capacity: i32,
    /// Defaults to 0 (free parking) if omitted.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub pay: i32,
    #[validate(nested)]
    pub points: Vec<CreateZonePoint>,
}

impl CreateZone {
    pub fn pixel_points(&self) -> Vec<PixelPoint> {
        self.points.iter().map(CreateZonePoint::pixel).collect()
    }
}

/// DTO for patching a zone. Unknown keys are rejected.
///
/// `occupied` and `confidence` distinguish an absent key (`None`) from an
/// explicit `null` (`Some(None)`), which resets the value to unknown.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateZone {
    pub zone_type: Option<ZoneKind>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub pay: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(range(min = 0))]
    pub occupied: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: Option<Option<f64>>,
}

impl UpdateZone {
    /// Whether this patch reports occupancy. Such patches stamp
    /// `occupancy_updated_at` and leave `updated_at` untouched.
    pub fn touches_occupancy(&self) -> bool {
        self.occupied.is_some()
    }
}

/// Optional predicates for zone listings, AND-combined.
#[derive(Debug, Clone, Default)]
pub struct ZoneFilter {
    pub camera_id: Option<DbId>,
    /// Minimum `capacity - occupied`. Zones with unknown occupancy never match.
    pub min_free_count: Option<i32>,
    /// Maximum `pay`, inclusive.
    pub max_pay: Option<i32>,
}
