//! Repository for the `cameras` table.

use parktrack_core::error::CoreError;
use parktrack_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::camera::{Camera, CameraFilter, CreateCamera, UpdateCamera};
use crate::StoreError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, is_active, source, image_width, image_height, \
    calib, latitude, longitude, created_at, updated_at";

/// Provides create, read, update and filtered listing for cameras.
pub struct CameraRepo;

impl CameraRepo {
    /// Insert a new camera, returning the created row.
    ///
    /// Fails with [`CoreError::Conflict`] if another camera already has the
    /// same title, compared case-insensitively.
    pub async fn create(pool: &PgPool, input: &CreateCamera) -> Result<Camera, StoreError> {
        let mut tx = pool.begin().await?;

        if Self::title_exists(&mut *tx, &input.title).await? {
            return Err(title_conflict(&input.title));
        }

        let query = format!(
            "INSERT INTO cameras
                (title, is_active, source, image_width, image_height, calib, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let camera = sqlx::query_as::<_, Camera>(&query)
            .bind(&input.title)
            .bind(input.is_active)
            .bind(&input.source)
            .bind(input.image_width)
            .bind(input.image_height)
            .bind(input.calib.is_some())
            .bind(input.calib.as_ref())
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(camera_id = camera.id, title = %camera.title, "Camera inserted");
        Ok(camera)
    }

    /// Find a camera by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cameras WHERE id = $1");
        sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cameras matching every predicate set in `filter`, ordered by id.
    ///
    /// The bounding box keeps cameras with `latitude <= top_left_lat`,
    /// `longitude >= top_left_lon`, `latitude >= bottom_right_lat` and
    /// `longitude >= bottom_right_lon`.
    pub async fn list(pool: &PgPool, filter: &CameraFilter) -> Result<Vec<Camera>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cameras
             WHERE ($1::TEXT IS NULL OR strpos(LOWER(title), LOWER($1)) > 0)
               AND ($2::FLOAT8 IS NULL OR latitude <= $2)
               AND ($3::FLOAT8 IS NULL OR longitude >= $3)
               AND ($4::FLOAT8 IS NULL OR latitude >= $4)
               AND ($5::FLOAT8 IS NULL OR longitude >= $5)
             ORDER BY id"
        );
        let bbox = filter.bbox.as_ref();
        sqlx::query_as::<_, Camera>(&query)
            .bind(&filter.text_query)
            .bind(bbox.map(|b| b.top_left_lat))
            .bind(bbox.map(|b| b.top_left_lon))
            .bind(bbox.map(|b| b.bottom_right_lat))
            .bind(bbox.map(|b| b.bottom_right_lon))
            .fetch_all(pool)
            .await
    }

    /// Update a camera. Only non-`None` fields in `input` are applied and
    /// `updated_at` always advances. An explicit `calib: null` clears the
    /// calibration payload.
    ///
    /// Fails with [`CoreError::NotFound`] for an unknown id and with
    /// [`CoreError::Conflict`] if a new title collides with another camera.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCamera,
    ) -> Result<Camera, StoreError> {
        let mut tx = pool.begin().await?;

        if !Self::id_exists(&mut *tx, id).await? {
            return Err(CoreError::NotFound {
                entity: "Camera",
                id,
            }
            .into());
        }

        if let Some(title) = &input.title {
            if Self::title_exists_excluding(&mut *tx, title, Some(id)).await? {
                return Err(title_conflict(title));
            }
        }

        let query = format!(
            "UPDATE cameras SET
                title = COALESCE($2, title),
                is_active = COALESCE($3, is_active),
                source = COALESCE($4, source),
                image_width = COALESCE($5, image_width),
                image_height = COALESCE($6, image_height),
                calib = CASE WHEN $7 THEN $8 ELSE calib END,
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let camera = sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.is_active)
            .bind(&input.source)
            .bind(input.image_width)
            .bind(input.image_height)
            .bind(input.calib.is_some())
            .bind(input.calib.as_ref().and_then(Option::as_ref))
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(camera)
    }

    /// Whether any camera has `title`, compared case-insensitively.
    pub async fn title_exists<'e>(
        executor: impl PgExecutor<'e>,
        title: &str,
    ) -> Result<bool, sqlx::Error> {
        Self::title_exists_excluding(executor, title, None).await
    }

    /// Like [`Self::title_exists`] but ignores the camera with id `exclude`.
    pub async fn title_exists_excluding<'e>(
        executor: impl PgExecutor<'e>,
        title: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM cameras
                WHERE LOWER(title) = LOWER($1)
                  AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(title)
        .bind(exclude)
        .fetch_one(executor)
        .await
    }

    /// Whether a camera with `id` exists.
    pub async fn id_exists<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cameras WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Total number of cameras.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cameras")
            .fetch_one(pool)
            .await
    }
}

fn title_conflict(title: &str) -> StoreError {
    CoreError::Conflict(format!("Camera with title '{title}' already exists")).into()
}
