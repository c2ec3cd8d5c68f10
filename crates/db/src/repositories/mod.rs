//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or any `PgExecutor`, so they compose inside a transaction).
//! Operations with more than one statement run in a single transaction that
//! is rolled back when it is dropped before commit.

pub mod camera_repo;
pub mod zone_repo;

pub use camera_repo::CameraRepo;
pub use zone_repo::ZoneRepo;
