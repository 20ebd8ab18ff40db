//! Metrics collection and exposition.
//!
//! # Metrics
//! - `actuator_endpoint_requests_total` (counter): by endpoint, outcome
//! - `actuator_shutdown_destroyed_total` (counter): components torn down, by kind
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::actuator::ShutdownCount;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics listener started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_endpoint_request(endpoint: &'static str, ok: bool) {
    let outcome = if ok { "success" } else { "error" };
    metrics::counter!(
        "actuator_endpoint_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_shutdown(count: &ShutdownCount) {
    for (kind, value) in [
        ("registries", count.registries),
        ("protocols", count.protocols),
        ("services", count.services),
        ("references", count.references),
    ] {
        metrics::counter!("actuator_shutdown_destroyed_total", "kind" => kind).increment(value as u64);
    }
}
