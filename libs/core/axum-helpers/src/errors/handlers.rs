use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::NotFound,
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
