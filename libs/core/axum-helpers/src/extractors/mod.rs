//! Custom extractors for Axum handlers.
//!
//! Both reject with an [`AppError`](crate::errors::AppError) response so that
//! malformed input gets the same error body as domain failures.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
