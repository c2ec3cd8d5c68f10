//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A filter struct for listing queries

pub mod camera;
pub mod zone;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some`, so that combined with
/// `#[serde(default)]` an `Option<Option<T>>` tells "absent" (`None`) apart
/// from an explicit `null` (`Some(None)`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
