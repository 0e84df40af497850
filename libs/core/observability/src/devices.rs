//! Device domain metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Outcome label values
pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_NOT_FOUND: &str = "not_found";
pub const OUTCOME_ERROR: &str = "error";

pub struct DeviceMetrics;

impl DeviceMetrics {
    /// Count one finished operation and record its latency.
    pub fn record_operation(operation: &'static str, outcome: &'static str, duration_secs: f64) {
        counter!(
            "device_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        histogram!("device_operation_duration_seconds", "operation" => operation)
            .record(duration_secs);
    }
}

/// Measures one device operation from construction to [`finish`](Self::finish).
///
/// ```rust,ignore
/// let timer = OperationTimer::start("create");
/// let result = repository.save(record).await;
/// timer.finish(if result.is_ok() { OUTCOME_OK } else { OUTCOME_ERROR });
/// ```
pub struct OperationTimer {
    operation: &'static str,
    started: Instant,
}

impl OperationTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    pub fn finish(self, outcome: &'static str) {
        let elapsed = self.started.elapsed();
        DeviceMetrics::record_operation(self.operation, outcome, elapsed.as_secs_f64());
        tracing::trace!(
            operation = self.operation,
            outcome,
            duration_ms = elapsed.as_millis() as u64,
            "device operation finished"
        );
    }
}
