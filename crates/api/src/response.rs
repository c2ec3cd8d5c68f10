//! Shared response body types for API handlers.

use parktrack_core::types::DbId;
use serde::Serialize;

/// Body returned by creation endpoints: the new identity plus a status line.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(id: DbId, entity: &str) -> Self {
        Self {
            id,
            message: format!("{entity} created"),
        }
    }
}
