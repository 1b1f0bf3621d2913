//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cep_weather_requests_total` (counter): requests by service, status
//! - `cep_weather_request_duration_seconds` (histogram): latency by service
//! - `cep_weather_lookups_total` (counter): external lookups by kind, outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter is opt-in

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(service: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "cep_weather_requests_total",
        "service" => service,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("cep_weather_request_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

/// Record an external lookup. `outcome` is "ok" or an error kind.
pub fn record_lookup(kind: &'static str, outcome: &'static str) {
    metrics::counter!("cep_weather_lookups_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}
