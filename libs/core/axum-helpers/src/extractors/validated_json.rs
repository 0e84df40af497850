//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed JSON, a missing `application/json` content type and bodies that
/// do not match `T` are rejected with 400 `INVALID_JSON`. Bodies failing
/// `T::validate` get 400 `VALIDATION_ERROR` with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewDevice {
///     #[validate(required, length(min = 1))]
///     name: Option<String>,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<NewDevice>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
