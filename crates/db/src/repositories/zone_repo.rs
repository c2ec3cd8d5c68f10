//! Repository for the `zones` and `zone_points` tables.

use parktrack_core::error::CoreError;
use parktrack_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::zone::{
    CreateZone, UpdateZone, Zone, ZoneDetail, ZoneFilter, ZonePoint, ZoneWithPointsRow,
};
use crate::repositories::CameraRepo;
use crate::StoreError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, camera_id, zone_type, capacity, occupied, confidence, pay, \
    occupancy_updated_at, created_at, updated_at";

const POINT_COLUMNS: &str = "id, zone_id, sort_order, x, y, latitude, longitude";

/// Provides create, read, update and filtered listing for zones.
///
/// Points are written and read together with their zone; they have no
/// standalone operations.
pub struct ZoneRepo;

impl ZoneRepo {
    /// Insert a zone and its corner points in one transaction.
    ///
    /// Fails with [`CoreError::NotFound`] if `camera_id` does not reference an
    /// existing camera; nothing is written in that case. Point order is kept
    /// as given. Geometry must already be validated by the caller.
    pub async fn create(pool: &PgPool, input: &CreateZone) -> Result<ZoneDetail, StoreError> {
        let mut tx = pool.begin().await?;

        if !CameraRepo::id_exists(&mut *tx, input.camera_id).await? {
            return Err(CoreError::NotFound {
                entity: "Camera",
                id: input.camera_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO zones (camera_id, zone_type, capacity, pay)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let zone = sqlx::query_as::<_, Zone>(&query)
            .bind(input.camera_id)
            .bind(input.zone_type.as_str())
            .bind(input.capacity)
            .bind(input.pay)
            .fetch_one(&mut *tx)
            .await?;

        let point_query = format!(
            "INSERT INTO zone_points (zone_id, sort_order, x, y, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {POINT_COLUMNS}"
        );
        let mut points = Vec::with_capacity(input.points.len());
        for (index, point) in input.points.iter().enumerate() {
            let row = sqlx::query_as::<_, ZonePoint>(&point_query)
                .bind(zone.id)
                .bind(index as i16)
                .bind(point.x)
                .bind(point.y)
                .bind(point.latitude)
                .bind(point.longitude)
                .fetch_one(&mut *tx)
                .await?;
            points.push(row);
        }

        tx.commit().await?;
        tracing::debug!(
            zone_id = zone.id,
            camera_id = zone.camera_id,
            points = points.len(),
            "Zone inserted"
        );
        Ok(ZoneDetail::new(zone, Some(points)))
    }

    /// Find a zone by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Zone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM zones WHERE id = $1");
        sqlx::query_as::<_, Zone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a zone with its points aggregated into the same row, so the whole
    /// footprint comes back in one round trip. Points are ordered by `sort_order`.
    pub async fn find_with_points(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ZoneDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                COALESCE(
                    (SELECT json_agg(json_build_object(
                                'id', p.id,
                                'zone_id', p.zone_id,
                                'sort_order', p.sort_order,
                                'x', p.x,
                                'y', p.y,
                                'latitude', p.latitude,
                                'longitude', p.longitude
                            ) ORDER BY p.sort_order)
                     FROM zone_points p
                     WHERE p.zone_id = zones.id),
                    '[]'::json
                ) AS points
             FROM zones
             WHERE id = $1"
        );
        let row = sqlx::query_as::<_, ZoneWithPointsRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| ZoneDetail::new(r.zone, Some(r.points.0))))
    }

    /// Fetch a zone, attaching its points only when `with_points` is set.
    pub async fn get(
        pool: &PgPool,
        id: DbId,
        with_points: bool,
    ) -> Result<Option<ZoneDetail>, sqlx::Error> {
        if with_points {
            Self::find_with_points(pool, id).await
        } else {
            let zone = Self::find_by_id(pool, id).await?;
            Ok(zone.map(|z| ZoneDetail::new(z, None)))
        }
    }

    /// List the points of a zone, ordered by `sort_order`.
    pub async fn list_points<'e>(
        executor: impl PgExecutor<'e>,
        zone_id: DbId,
    ) -> Result<Vec<ZonePoint>, sqlx::Error> {
        let query =
            format!("SELECT {POINT_COLUMNS} FROM zone_points WHERE zone_id = $1 ORDER BY sort_order");
        sqlx::query_as::<_, ZonePoint>(&query)
            .bind(zone_id)
            .fetch_all(executor)
            .await
    }

    /// List zones matching every predicate set in `filter`, ordered by id.
    ///
    /// `min_free_count` compares `capacity - occupied`; a NULL `occupied`
    /// makes the comparison NULL, so zones with unknown occupancy drop out.
    pub async fn list(pool: &PgPool, filter: &ZoneFilter) -> Result<Vec<Zone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM zones
             WHERE ($1::BIGINT IS NULL OR camera_id = $1)
               AND ($2::INT IS NULL OR capacity - occupied >= $2)
               AND ($3::INT IS NULL OR pay <= $3)
             ORDER BY id"
        );
        sqlx::query_as::<_, Zone>(&query)
            .bind(filter.camera_id)
            .bind(filter.min_free_count)
            .bind(filter.max_pay)
            .fetch_all(pool)
            .await
    }

    /// Patch a zone and return it with its points.
    ///
    /// A patch carrying `occupied` (even as `null`) is an occupancy report: it
    /// stamps `occupancy_updated_at` and leaves `updated_at` alone. Any other
    /// patch advances `updated_at` only.
    ///
    /// Fails with [`CoreError::NotFound`] if no zone with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateZone,
    ) -> Result<ZoneDetail, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE zones SET
                zone_type = COALESCE($2, zone_type),
                capacity = COALESCE($3, capacity),
                pay = COALESCE($4, pay),
                occupied = CASE WHEN $5 THEN $6 ELSE occupied END,
                confidence = CASE WHEN $7 THEN $8 ELSE confidence END,
                occupancy_updated_at = CASE WHEN $5 THEN NOW() ELSE occupancy_updated_at END,
                updated_at = CASE WHEN $5 THEN updated_at ELSE NOW() END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let zone = sqlx::query_as::<_, Zone>(&query)
            .bind(id)
            .bind(input.zone_type.map(|k| k.as_str()))
            .bind(input.capacity)
            .bind(input.pay)
            .bind(input.touches_occupancy())
            .bind(input.occupied.flatten())
            .bind(input.confidence.is_some())
            .bind(input.confidence.flatten())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(zone) = zone else {
            return Err(CoreError::NotFound { entity: "Zone", id }.into());
        };

        let points = Self::list_points(&mut *tx, zone.id).await?;
        tx.commit().await?;

        if input.touches_occupancy() {
            tracing::debug!(zone_id = zone.id, occupied = ?zone.occupied, "Zone occupancy updated");
        }
        Ok(ZoneDetail::new(zone, Some(points)))
    }
}
