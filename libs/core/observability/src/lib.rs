//! Observability utilities for the device service.
//!
//! - Prometheus recorder installation and the `/metrics` handler
//! - [`DeviceMetrics`] for domain operation counters and latencies
//! - [`middleware::metrics_middleware`] for per-route HTTP metrics
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler};
//!
//! init_metrics()?;
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler))
//!     .layer(axum::middleware::from_fn(observability::middleware::metrics_middleware));
//! ```

pub mod devices;
pub mod middleware;

pub use devices::{DeviceMetrics, OperationTimer};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder. Safe to call more than once; only
/// the first call installs.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `/metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "device_operations_total",
        "Device operations by operation and outcome"
    );
    describe_histogram!(
        "device_operation_duration_seconds",
        "Device operation duration in seconds"
    );
}
