use parktrack_core::error::CoreError;

/// Failure of a store operation.
///
/// Domain outcomes (missing parent, duplicate title) are reported as
/// [`CoreError`]; anything the driver raises is kept as the raw
/// [`sqlx::Error`]. In both cases the surrounding transaction has been
/// rolled back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
