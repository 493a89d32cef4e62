//! Metrics collection and Prometheus export.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops, so tests that
/// build several applications in one process can call it freely.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_exercise_created() {
    metrics::counter!("exercises_created_total").increment(1);
}

pub fn record_exercise_updated() {
    metrics::counter!("exercises_updated_total").increment(1);
}

pub fn record_exercise_deleted() {
    metrics::counter!("exercises_deleted_total").increment(1);
}

pub fn record_lookup(filter: &'static str, outcome: &'static str) {
    metrics::counter!(
        "exercise_lookups_total",
        "filter" => filter,
        "outcome" => outcome
    )
    .increment(1);
}
