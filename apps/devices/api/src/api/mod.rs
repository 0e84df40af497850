use axum::{Router, routing::get};
use domain_devices::entity::Model as DeviceModel;

pub mod devices;
pub mod health;

/// Device routes at their public paths (`/devices`, `/devices/{id}`,
/// `/devices/brand/{brand}`), with HTTP metrics.
pub fn routes(state: &crate::state::AppState) -> Router {
    mount(devices::router(state))
}

fn mount(device_routes: Router) -> Router {
    Router::new()
        .nest(DeviceModel::URL, device_routes)
        .layer(axum::middleware::from_fn(
            observability::middleware::metrics_middleware,
        ))
}

/// `/ready`, checking the database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Prometheus scrape endpoint
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(observability::metrics_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use core_config::server::ServerConfig;
    use domain_devices::{Device, DeviceService, InMemoryDeviceRepository, handlers};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    /// Same assembly as `main`, over the in-memory store.
    fn app() -> Router {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let routes = mount(handlers::router(service));
        axum_helpers::create_router::<ApiDoc>(routes, &ServerConfig::default()).unwrap()
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_device_lifecycle_at_public_paths() {
        temp_env::async_with_vars(
            [("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000"))],
            async {
                let app = app();

                let create = Request::post("/devices")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"name": "iPhone 15", "brand": "Apple"}).to_string(),
                    ))
                    .unwrap();
                let response = app.clone().oneshot(create).await.unwrap();
                assert_eq!(response.status(), StatusCode::CREATED);
                let bytes = response.into_body().collect().await.unwrap().to_bytes();
                let created: Device = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(created.id, 1);

                let response = app.clone().oneshot(empty("GET", "/devices/1")).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);

                let response = app
                    .clone()
                    .oneshot(empty("GET", "/devices/brand/Apple"))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK);

                let response = app
                    .clone()
                    .oneshot(empty("DELETE", "/devices/1"))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::NO_CONTENT);

                let response = app.oneshot(empty("GET", "/devices/1")).await.unwrap();
                assert_eq!(response.status(), StatusCode::NOT_FOUND);
            },
        )
        .await;
    }

    #[tokio::test]
    async fn test_prefixed_path_is_not_served() {
        temp_env::async_with_vars(
            [("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000"))],
            async {
                let response = app().oneshot(empty("GET", "/api/devices")).await.unwrap();
                assert_eq!(response.status(), StatusCode::NOT_FOUND);
            },
        )
        .await;
    }
}
