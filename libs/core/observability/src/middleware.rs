//! Axum middleware for per-route HTTP metrics.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Records, per matched route template:
/// - `http_requests_total` with method, route, status and status class
/// - `http_request_duration_seconds` with method and route
/// - `http_requests_errors_total` for 4xx and 5xx responses
///
/// Requests that match no route are labelled `unmatched` so raw paths such as
/// `/devices/123` never become label values.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(handler))
///     .route_layer(axum::middleware::from_fn(metrics_middleware));
/// ```
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_class = match status.as_u16() {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.as_u16().to_string(),
        "status_class" => status_class
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "route" => route.clone()
    )
    .record(duration.as_secs_f64());

    if status.is_client_error() || status.is_server_error() {
        counter!(
            "http_requests_errors_total",
            "method" => method,
            "route" => route,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
    }

    response
}
