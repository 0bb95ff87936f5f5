//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nested_requests_total` (counter): requests by route, method, status
//! - `nested_request_duration_seconds` (histogram): dispatch latency
//! - `nested_route_table_size` (gauge): entries in the live route table
//! - `nested_route_table_reloads_total` (counter): reloads by outcome
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Needs a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(%error, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    counter!(
        "nested_requests_total",
        "route" => route.to_owned(),
        "method" => method.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("nested_request_duration_seconds", "route" => route.to_owned())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_table_size(entries: usize) {
    gauge!("nested_route_table_size").set(entries as f64);
}

pub fn record_reload(outcome: &'static str) {
    counter!("nested_route_table_reloads_total", "outcome" => outcome).increment(1);
}
