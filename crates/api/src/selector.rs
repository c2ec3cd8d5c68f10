//! Round-robin camera selection for the polling consumer.
//!
//! One [`CameraSelector`] lives in [`crate::state::AppState`] for the life of
//! the process. Each call serves the camera whose id equals the cursor, then
//! advances it. The cursor sits behind an async mutex held for the whole
//! step, so concurrent callers are serialized and every id is handed out
//! exactly once per cycle.

use parktrack_core::rotation::RotationCursor;
use parktrack_db::models::camera::Camera;
use parktrack_db::repositories::CameraRepo;
use sqlx::PgPool;
use tokio::sync::Mutex;

pub struct CameraSelector {
    cursor: Mutex<RotationCursor>,
}

impl Default for CameraSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSelector {
    pub fn new() -> Self {
        Self {
            cursor: Mutex::new(RotationCursor::new()),
        }
    }

    /// Return the camera at the cursor and advance it.
    ///
    /// The camera count is computed lazily and cached until
    /// [`Self::invalidate_count`]. A gap in the id space yields `None` for
    /// that step; the cursor still moves on. On a database error the cursor
    /// is left where it was.
    pub async fn next_camera(&self, pool: &PgPool) -> Result<Option<Camera>, sqlx::Error> {
        let mut cursor = self.cursor.lock().await;

        if cursor.total().is_none() {
            let total = CameraRepo::count(pool).await?;
            tracing::debug!(total, "Camera count cached for rotation");
            cursor.set_total(total);
        }

        let id = cursor.current();
        let camera = CameraRepo::find_by_id(pool, id).await?;
        cursor.advance();

        if camera.is_none() {
            tracing::debug!(camera_id = id, "Rotation hit a missing camera id");
        }
        Ok(camera)
    }

    /// Forget the cached camera count. Called after a camera is created so
    /// the next cycle includes it.
    pub async fn invalidate_count(&self) {
        self.cursor.lock().await.invalidate_total();
    }

    /// Snapshot of the cursor, for diagnostics and tests.
    pub async fn cursor(&self) -> RotationCursor {
        self.cursor.lock().await.clone()
    }
}
