//! Parking zone kinds, field limits and derived occupancy values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum camera title length in characters.
pub const MAX_CAMERA_TITLE_LEN: u64 = 200;

/// How spots are laid out inside a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Curbside spots along the street.
    Parallel,
    /// Marked bays in a lot.
    Standard,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Parallel => "parallel",
            ZoneKind::Standard => "standard",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parallel" => Ok(ZoneKind::Parallel),
            "standard" => Ok(ZoneKind::Standard),
            other => Err(CoreError::Validation(format!(
                "unknown zone type '{other}', expected 'parallel' or 'standard'"
            ))),
        }
    }
}

impl TryFrom<String> for ZoneKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Free spots in a zone: `capacity - occupied`.
///
/// Unknown occupancy yields `None`. The result is not clamped, so an
/// over-reported `occupied` gives a negative count.
pub fn free_count(capacity: i32, occupied: Option<i32>) -> Option<i32> {
    occupied.map(|o| capacity - o)
}
