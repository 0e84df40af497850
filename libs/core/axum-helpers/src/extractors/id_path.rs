//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extracts a single `i64` path segment such as `/devices/{id}`.
///
/// Anything that does not parse as a signed 64-bit integer is rejected with
/// 400 `INVALID_ID` instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn get_device(IdPath(id): IdPath) -> String {
///     format!("Device ID: {}", id)
/// }
///
/// let app = Router::new().route("/devices/{id}", get(get_device));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.trim()
            .parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}
