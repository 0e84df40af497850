use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

pub const CORS_ENV_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Build a CORS layer from the comma-separated `CORS_ALLOWED_ORIGIN` list.
///
/// Fails when the variable is unset, empty, or holds a value that is not a
/// valid header value. Allowed methods cover the device API (GET, POST, PUT,
/// PATCH, DELETE) plus preflight.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let origins = std::env::var(CORS_ENV_VAR).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN environment variable is required. Example: CORS_ALLOWED_ORIGIN=http://localhost:3000",
        )
    })?;

    cors_layer(&origins)
}

pub fn cors_layer(origins: &str) -> io::Result<CorsLayer> {
    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins);

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_list() {
        assert!(cors_layer("http://localhost:3000, https://devices.example.com").is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_empty() {
        let err = cors_layer(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cors_layer_from_env_requires_var() {
        temp_env::with_var_unset(CORS_ENV_VAR, || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
