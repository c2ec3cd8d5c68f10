//! Round-robin cursor over camera ids.
//!
//! The cursor walks raw id values `1..=total`, where `total` is the cached
//! number of cameras. Ids are not assumed dense: a missing id still consumes
//! a step, it is not retried.

use crate::types::DbId;

/// Id the rotation starts from and wraps back to.
pub const FIRST_CAMERA_ID: DbId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCursor {
    index: DbId,
    total: Option<i64>,
}

impl Default for RotationCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationCursor {
    pub fn new() -> Self {
        Self {
            index: FIRST_CAMERA_ID,
            total: None,
        }
    }

    /// The camera id to serve on this step.
    pub fn current(&self) -> DbId {
        self.index
    }

    /// Cached camera count, if computed.
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    pub fn set_total(&mut self, total: i64) {
        self.total = Some(total);
    }

    /// Drop the cached count so the next step recomputes it.
    pub fn invalidate_total(&mut self) {
        self.total = None;
    }

    /// Move to the next id, wrapping to [`FIRST_CAMERA_ID`] once the index
    /// reaches the cached total.
    ///
    /// An index at or past the total (including an empty or uncached table)
    /// wraps, so the cursor never runs off into unbounded ids.
    pub fn advance(&mut self) {
        let total = self.total.unwrap_or(0);
        if self.index >= total {
            self.index = FIRST_CAMERA_ID;
        } else {
            self.index += 1;
        }
    }
}
