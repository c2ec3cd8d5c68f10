//! JSON body extractor with field validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// A JSON request body that has passed `serde` deserialization and its
/// [`Validate`] rules.
///
/// Malformed JSON, unknown keys and bad enum values become a 400
/// `BAD_REQUEST`; failed field rules become a 400 `VALIDATION_ERROR`. Either
/// way nothing reaches the store.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateCamera>) -> AppResult<...> {
///     // `input` is well-formed here.
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
