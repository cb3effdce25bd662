//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_requests_total` (counter): requests by outcome
//!   (`redirect`, `localized`, `pass_through`) and locale
//! - `locale_upstream_requests_total` (counter): forwarded requests by status
//! - `locale_upstream_duration_seconds` (histogram): upstream latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is optional and off by default

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::locale::Locale;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one resolution outcome.
pub fn record_resolution(outcome: &'static str, locale: Option<&Locale>) {
    let locale = locale.map(|l| l.code().to_string()).unwrap_or_else(|| "none".to_string());
    counter!("locale_requests_total", "outcome" => outcome, "locale" => locale).increment(1);
}

/// Count one forwarded request and its latency.
pub fn record_upstream(status: u16, start: Instant) {
    counter!("locale_upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("locale_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
