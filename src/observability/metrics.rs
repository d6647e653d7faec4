//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_requests_total` (counter): requests by endpoint, status
//! - `dashboard_request_duration_seconds` (histogram): latency by endpoint
//! - `dashboard_view_loads_total` (counter): view loads by view, outcome
//! - `dashboard_streams` (gauge): streams currently published

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a served request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "dashboard_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "dashboard_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one view load attempt.
pub fn record_view_load(view: &str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!(
        "dashboard_view_loads_total",
        "view" => view.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_stream_count(count: usize) {
    metrics::gauge!("dashboard_streams").set(count as f64);
}
