use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by a [`DeviceRepository`](crate::repository::DeviceRepository)
#[derive(Debug, Error)]
pub enum StorageError {
    /// A NOT NULL column was given no value
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device not found with id: {0}")]
    NotFound(i64),

    /// A storage failure, tagged with the operation that hit it
    #[error("{message}")]
    Service {
        message: &'static str,
        #[source]
        source: StorageError,
    },
}

impl DeviceError {
    pub fn service(message: &'static str, source: StorageError) -> Self {
        DeviceError::Service { message, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeviceError::NotFound(_))
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// The storage cause is logged by `AppError` and never reaches the client.
impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeviceError::Service { message, source } => {
                AppError::InternalServerError(format!("{}: {}", message, source))
            }
        }
    }
}

impl IntoResponse for DeviceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message() {
        let err = DeviceError::NotFound(42);
        assert_eq!(err.to_string(), "Device not found with id: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_service_error_keeps_source() {
        let err = DeviceError::service(
            "Error creating device",
            StorageError::Constraint("name must not be null".into()),
        );
        assert_eq!(err.to_string(), "Error creating device");
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("name must not be null"));
    }

    #[test]
    fn test_status_mapping() {
        let not_found = DeviceError::NotFound(1).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let failure = DeviceError::service(
            "Error retrieving devices",
            StorageError::Unavailable("offline".into()),
        )
        .into_response();
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
