//! Domain logic for the ParkTrack occupancy service.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types and validation functions.

pub mod error;
pub mod geo;
pub mod geometry;
pub mod rotation;
pub mod types;
pub mod zone;
